//! Error types for silica-graphics.

use crate::backend::BackendError;
use crate::image::DecodeError;
use thiserror::Error;

/// Result type alias using GraphicsError.
pub type GraphicsResult<T> = Result<T, GraphicsError>;

/// Misuse of the graphics state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    /// `restore` with no matching `save`.
    #[error("restore called without a matching save")]
    UnbalancedRestore,

    /// `end_transparency_layer` with no open layer.
    #[error("end_transparency_layer called without a matching begin_transparency_layer")]
    UnbalancedTransparencyLayer,

    /// Text was shown before a font was selected.
    #[error("no font selected")]
    NoFont,
}

/// Errors that can occur in graphics context operations.
#[derive(Debug, Error)]
pub enum GraphicsError {
    #[error(transparent)]
    State(#[from] StateError),

    /// A backend call reported a non-success status.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// No installed font matches the requested name.
    #[error("no font matches {name:?}")]
    FontResolution { name: String },

    /// Image bytes could not be decoded.
    #[error("image decode error: {0}")]
    Decode(#[from] DecodeError),
}
