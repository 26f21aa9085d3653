//! Writes generated documents to the output directory as whole-file UTF-8 text.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::AppError;

/// Writes `contents` to `dir/file_name`, creating `dir` if needed.
/// Returns the full path written.
pub fn write_document(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf, AppError> {
    std::fs::create_dir_all(dir).map_err(|e| AppError::io(dir, e))?;
    let path = dir.join(file_name);
    std::fs::write(&path, contents).map_err(|e| AppError::io(&path, e))?;
    info!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(path)
}
