//! Utility functions for logging previews and file system operations.

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes with an ellipsis and
/// byte count indicator appended. The cut backs off to the nearest char
/// boundary, since article titles are arbitrary store text.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

/// Write a file only if its content changed.
///
/// Keeps artifact mtimes stable across no-op builds so the Pages deploy only
/// picks up real changes.
///
/// # Returns
///
/// `true` if the file was written, `false` if it was already up to date.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_if_changed(path: &str, content: &str) -> Result<bool, Box<dyn Error>> {
    if let Ok(previous) = fs::read_to_string(path).await {
        if previous == content {
            info!("Unchanged; skipping write");
            return Ok(false);
        }
    }
    fs::write(path, content).await?;
    info!("Wrote file");
    Ok(true)
}
