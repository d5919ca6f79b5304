use crate::types::{Article, BuildError, Result};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

/// Render the final sorted article list as a standalone HTML document.
/// All feed-controlled text is escaped; feeds are untrusted input.
pub fn render(articles: &[Article]) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>Newsroll</title>\n");
    html.push_str("<link rel=\"stylesheet\" href=\"styles.css\">\n");
    html.push_str("</head>\n<body>\n<main>\n<h1>Newsroll</h1>\n<ul class=\"articles\">\n");

    for article in articles {
        html.push_str("<li class=\"article\">\n");
        let _ = writeln!(
            html,
            "<a href=\"{}\">{}</a>",
            encode_double_quoted_attribute(&article.link),
            encode_text(&article.title)
        );
        let _ = writeln!(
            html,
            "<span class=\"meta\">{} · {}</span>",
            encode_text(&article.source_title),
            format_age(article.age_in_days)
        );
        if !article.description.is_empty() {
            let _ = writeln!(html, "<p>{}</p>", encode_text(&article.description));
        }
        html.push_str("</li>\n");
    }

    html.push_str("</ul>\n</main>\n</body>\n</html>\n");
    html
}

fn format_age(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "1 day ago".to_string(),
        n => format!("{} days ago", n),
    }
}

/// Write the rendered page to `<out_dir>/index.html`. Failures are
/// fatal: a build that produced no page did not succeed.
pub fn write_html(out_dir: &Path, html: &str) -> Result<()> {
    fs::create_dir_all(out_dir).map_err(|e| BuildError::CacheWrite {
        path: out_dir.display().to_string(),
        source: e,
    })?;

    let path = out_dir.join("index.html");
    fs::write(&path, html).map_err(|e| BuildError::CacheWrite {
        path: path.display().to_string(),
        source: e,
    })?;

    info!("Wrote {}", path.display());
    Ok(())
}
