//! Error types for the render crate.

use thiserror::Error;

use crate::layer::LayerId;

/// Errors that can occur while managing compositing layers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayerError {
    /// The layer does not exist (never created, or released by a frame sweep).
    #[error("unknown layer {0:?}")]
    UnknownLayer(LayerId),

    /// A frame ended while layers were still pushed.
    #[error("frame ended with {depth} layer(s) still pushed")]
    UnbalancedLayers { depth: usize },
}

/// Result type for layer operations.
pub type LayerResult<T> = Result<T, LayerError>;
