//! Crate-wide error type.

use thiserror::Error;

/// Errors reported by the texture cache and the animation registry.
///
/// Validation failures leave all prior state unchanged. The steady-state
/// render path never surfaces these: a missing animation, clip, or texture
/// degrades to a no-op draw instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A key, grid dimension, duration, or frame index failed validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The named texture, animation, or clip is not registered.
    #[error("not found: {0}")]
    NotFound(String),

    /// A clip with the same name is already registered on the animation.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// The rendering context failed to decode an image file.
    #[error("failed to decode '{path}': {reason}")]
    Decode { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
