use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Open a URL in the user's default browser.
pub fn open_url(url: &str) -> Result<()> {
    debug!(url = url, "Opening URL in browser");
    open::that(url).with_context(|| format!("Failed to open {url}"))
}

/// Open a saved file with the system's default application.
pub fn open_path(path: &Path) -> Result<()> {
    debug!(path = %path.display(), "Opening saved file");
    open::that(path).with_context(|| format!("Failed to open {}", path.display()))
}
