use crate::types::{BuildError, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Copy every regular file at the top level of `assets_dir` into
/// `out_dir`. A missing asset directory is not an error; stylesheets and
/// favicons are optional.
pub fn copy_assets(assets_dir: &Path, out_dir: &Path) -> Result<()> {
    if !assets_dir.is_dir() {
        debug!("No asset directory at {}, skipping", assets_dir.display());
        return Ok(());
    }

    fs::create_dir_all(out_dir).map_err(|e| BuildError::CacheWrite {
        path: out_dir.display().to_string(),
        source: e,
    })?;

    let mut copied = 0usize;
    for entry in fs::read_dir(assets_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let dest = out_dir.join(entry.file_name());
        fs::copy(&path, &dest).map_err(|e| BuildError::CacheWrite {
            path: dest.display().to_string(),
            source: e,
        })?;
        copied += 1;
    }

    info!("Copied {} asset file(s) to {}", copied, out_dir.display());
    Ok(())
}
