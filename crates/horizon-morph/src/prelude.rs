//! Prelude module for Horizon Morph.
//!
//! ```ignore
//! use horizon_morph::prelude::*;
//! ```
//!
//! This provides access to:
//! - Progress sources (`AnimationProgress`, `ProgressSource`)
//! - The morph node and its configuration (`MorphNode`, `MorphConfig`)
//! - Layout seams (`RenderBox`, `RenderHost`, `BoxConstraints`)
//! - Painting (`PaintContext`, `RecordingContext`, `LayerTree`)
//! - Geometry types (`Point`, `Size`, `Rect`)

// ============================================================================
// Progress Sources
// ============================================================================

pub use crate::{AnimationProgress, ConstantProgress, ProgressSource, ReverseProgress};

// ============================================================================
// Morph Node
// ============================================================================

pub use crate::morph::{MorphConfig, MorphNode, MorphNodeBuilder};
pub use crate::{ChildSlot, MorphError, MorphResult};

// ============================================================================
// Layout
// ============================================================================

pub use crate::layout::{
    Alignment, AlignmentDirectional, BoxConstraints, StackFit, TextDirection,
};
pub use crate::{FrameInvalidation, RenderBox, RenderHost};

// ============================================================================
// Painting
// ============================================================================

pub use crate::{
    ClipBehavior, LayerTree, PaintContext, Paintable, Picture, RecordingContext,
};

// ============================================================================
// Geometry
// ============================================================================

pub use crate::{Point, Rect, Size};
