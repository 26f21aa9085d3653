//! Resume loading. The resume is opaque text; the only structure imposed on it
//! is a length cap before it goes into a prompt.

use std::path::Path;

use tracing::{info, warn};

use crate::errors::AppError;

/// Maximum number of characters sent to the completion service.
pub const MAX_RESUME_CHARS: usize = 6000;

#[derive(Debug, Clone)]
pub struct ResumeText(String);

impl ResumeText {
    /// Wraps `text`, truncating to [`MAX_RESUME_CHARS`] on a char boundary.
    pub fn new(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if let Some((idx, _)) = text.char_indices().nth(MAX_RESUME_CHARS) {
            warn!("Resume is longer than {MAX_RESUME_CHARS} characters, truncating");
            text.truncate(idx);
        }
        Self(text)
    }

    /// Reads a resume from disk. `.pdf` files go through text extraction,
    /// everything else is read as UTF-8.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

        let text = if is_pdf {
            pdf_extract::extract_text(path).map_err(|e| {
                AppError::Internal(anyhow::anyhow!(
                    "Failed to extract text from {}: {e}",
                    path.display()
                ))
            })?
        } else {
            std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?
        };

        info!("Loaded resume from {} ({} bytes)", path.display(), text.len());
        Ok(Self::new(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
