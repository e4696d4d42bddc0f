//! Error types for silica-skia.

use thiserror::Error;

/// Result type alias using SkiaError.
pub type SkiaResult<T> = Result<T, SkiaError>;

/// Errors raised while exporting rendered output.
#[derive(Debug, Error)]
pub enum SkiaError {
    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngError(String),

    /// Writing the encoded output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<png::EncodingError> for SkiaError {
    fn from(err: png::EncodingError) -> Self {
        SkiaError::PngError(err.to_string())
    }
}
