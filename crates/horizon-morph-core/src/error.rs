//! Error types for the core crate.

use thiserror::Error;

/// Errors raised by core primitives.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A progress value was not a finite number.
    #[error("progress value must be finite, got {0}")]
    InvalidProgress(f32),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
