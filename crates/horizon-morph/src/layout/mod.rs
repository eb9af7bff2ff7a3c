//! Box layout primitives used by the morph node.
//!
//! - [`BoxConstraints`]: min/max bounds handed down during layout
//! - [`Alignment`] / [`AlignmentDirectional`]: where a child sits in its parent
//! - [`StackFit`] / [`StackChild`]: overlapping children and their offsets

mod alignment;
mod constraints;
mod stack;

pub use alignment::{Alignment, AlignmentDirectional, AlignmentGeometry, TextDirection};
pub use constraints::BoxConstraints;
pub use stack::{StackChild, StackFit};
