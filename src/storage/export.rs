//! PNG export of the current raster.

use crate::util::sanitize_file_name;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Ensure the export directory exists, creating it if necessary.
fn ensure_directory_exists(directory: &Path) -> Result<PathBuf> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory).with_context(|| {
            format!("failed to create export directory {}", directory.display())
        })?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// File name an export of `board_name` is written to.
pub fn export_file_name(board_name: &str) -> String {
    format!("{}.png", sanitize_file_name(board_name))
}

/// Write PNG bytes to `<directory>/<board name>.png`, replacing any earlier export.
///
/// # Returns
/// Path to the written file
pub fn export_png(png: &[u8], directory: &Path, board_name: &str) -> Result<PathBuf> {
    let directory = ensure_directory_exists(directory)?;
    let file_path = directory.join(export_file_name(board_name));

    log::info!(
        "Exporting board to: {} ({} bytes)",
        file_path.display(),
        png.len()
    );

    fs::write(&file_path, png)
        .with_context(|| format!("failed to write export {}", file_path.display()))?;

    let written_size = fs::metadata(&file_path)?.len();
    log::debug!("Export written: {} bytes", written_size);

    Ok(file_path)
}
