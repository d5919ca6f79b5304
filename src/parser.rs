use crate::types::{BuildError, ParsedFeed, RawItem, Result};
use feed_rs::parser;
use tracing::debug;

/// Parse an RSS/Atom body into a [`ParsedFeed`].
///
/// The feed title falls back to the feed id when no title element is
/// present (Atom feeds always carry an id). Item publish dates fall back
/// to the entry's updated date, which is what Atom-only feeds provide.
pub fn parse_feed(url: &str, body: &str) -> Result<ParsedFeed> {
    debug!("Parsing feed content ({} bytes)", body.len());

    let feed = parser::parse(body.as_bytes()).map_err(|e| BuildError::Parse {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let title = feed
        .title
        .map(|t| t.content)
        .or_else(|| if feed.id.is_empty() { None } else { Some(feed.id) });

    let items = feed
        .entries
        .into_iter()
        .map(|entry| RawItem {
            title: entry.title.map(|t| t.content),
            link: entry.links.first().map(|l| l.href.clone()),
            published: entry.published.or(entry.updated),
            description: entry.summary.map(|s| s.content),
        })
        .collect();

    Ok(ParsedFeed { title, items })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS_BODY: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Example Feed</title>
    <item>
      <title>First post</title>
      <link>https://example.com/first</link>
      <pubDate>Tue, 05 Aug 2025 12:00:00 GMT</pubDate>
      <description>&lt;p&gt;Hello&lt;/p&gt;</description>
    </item>
    <item>
      <title>Undated post</title>
      <link>https://example.com/undated</link>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_rss_items_in_document_order() {
        let feed = parse_feed("https://example.com/feed", RSS_BODY).unwrap();

        assert_eq!(feed.title.as_deref(), Some("Example Feed"));
        assert_eq!(feed.items.len(), 2);
        assert_eq!(feed.items[0].title.as_deref(), Some("First post"));
        assert_eq!(feed.items[0].link.as_deref(), Some("https://example.com/first"));
        assert!(feed.items[0].published.is_some());
        assert_eq!(feed.items[0].description.as_deref(), Some("<p>Hello</p>"));
        assert!(feed.items[1].published.is_none());
    }

    #[test]
    fn rejects_non_feed_body() {
        let err = parse_feed("https://example.com/feed", "not a feed at all").unwrap_err();
        assert!(matches!(err, BuildError::Parse { .. }));
    }

    #[test]
    fn atom_entry_falls_back_to_updated_date() {
        let body = r#"<?xml version="1.0"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <id>urn:example:feed</id>
  <title>Atom Feed</title>
  <updated>2025-08-10T00:00:00Z</updated>
  <entry>
    <id>urn:example:1</id>
    <title>Entry</title>
    <link href="https://example.com/entry"/>
    <updated>2025-08-10T00:00:00Z</updated>
  </entry>
</feed>"#;

        let feed = parse_feed("https://example.com/atom", body).unwrap();
        assert_eq!(feed.items.len(), 1);
        assert!(feed.items[0].published.is_some());
    }
}
