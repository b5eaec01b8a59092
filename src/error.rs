//! Error types for map composition.

use thiserror::Error;

/// Errors produced while composing or saving a map document.
///
/// Noisy POI data is not an error: missing optional fields render as
/// placeholders and unknown filters fall back to the default marker color.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for map operations.
pub type Result<T> = std::result::Result<T, MapError>;
