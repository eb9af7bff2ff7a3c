//! Error types for the morph crate.

use thiserror::Error;

use crate::render_box::ChildSlot;

/// Errors raised when building or wiring a morph node.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MorphError {
    /// A morph node was built without one of its two children.
    #[error("morph node is missing its {0} child")]
    MissingChild(ChildSlot),

    /// A morph node was built without a progress source.
    #[error("morph node has no progress source")]
    MissingProgressSource,

    /// The node is already attached to a host.
    #[error("morph node is already attached")]
    AlreadyAttached,

    /// Constraint bounds are negative, inverted or NaN.
    #[error(
        "invalid constraints: width {min_width}..={max_width}, height {min_height}..={max_height}"
    )]
    InvalidConstraints {
        min_width: f32,
        max_width: f32,
        min_height: f32,
        max_height: f32,
    },
}

/// Result type for morph operations.
pub type MorphResult<T> = Result<T, MorphError>;
