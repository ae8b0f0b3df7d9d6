//! Screenshot → structured data extraction through a multimodal model.

pub mod gemini;
pub mod recovery;

use crate::errors::{AppError, AppResult};
use crate::models::sleep_record::SLEEP_FIELDS;
use std::fs;
use std::path::Path;

pub use gemini::GeminiExtractor;
pub use recovery::recover_object;

/// An image file ready to be sent inline.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ImageInput {
    /// Read a png/jpg/jpeg file; the MIME type comes from the extension.
    pub fn load(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let mime_type = match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            _ => return Err(AppError::UnsupportedImage(path.display().to_string())),
        };

        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            mime_type,
            bytes,
        })
    }
}

/// Anything that can answer a prompt about a set of images with free text.
pub trait Extractor {
    fn extract(&self, prompt: &str, images: &[ImageInput]) -> AppResult<String>;
}

/// Fixed instruction sent along with sleep-tracker screenshots.
pub fn sleep_prompt() -> String {
    format!(
        "Extract the following items from these sleep-tracking app screenshots \
         and answer with a single JSON object only. \
         Items: {} (date as YYYY-MM-DD).",
        SLEEP_FIELDS.join(", ")
    )
}
