//! Unified application error type.
//! All modules (db, core, sheet, extract, cli) return AppError so that every
//! failure reaches the command boundary the same way.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Workbook / database
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Column '{column}' not found in tab '{tab}'")]
    MissingColumn { tab: String, column: String },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Unknown step: {0}")]
    UnknownStep(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored row could not be turned back into a typed record.
    #[error("Malformed stored record: {0}")]
    MalformedRecord(String),

    // ---------------------------
    // Extraction errors
    // ---------------------------
    #[error("Extraction service error: {0}")]
    Extraction(String),

    #[error("No JSON object found in the extraction response")]
    NoJsonFound,

    #[error("Malformed extraction response: {0}")]
    MalformedExtraction(String),

    #[error("Extraction response is missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Unsupported image file: {0}")]
    UnsupportedImage(String),

    #[error("No pending sleep record, run `sleep analyze` first")]
    NoPendingSleep,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl From<ureq::Error> for AppError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, resp) => {
                let body = resp.into_string().unwrap_or_default();
                AppError::Extraction(format!("HTTP {code}: {}", body.trim()))
            }
            ureq::Error::Transport(t) => AppError::Extraction(t.to_string()),
        }
    }
}

impl AppError {
    /// True for stored-data problems that the caller may degrade from.
    pub fn is_malformed_data(&self) -> bool {
        matches!(
            self,
            AppError::MalformedRecord(_) | AppError::InvalidTime(_) | AppError::InvalidDate(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
