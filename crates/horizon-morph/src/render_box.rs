//! The seams between render nodes and their host.

use std::fmt;

use horizon_morph_render::{Paintable, Size};

use crate::layout::BoxConstraints;

/// A node in the render tree that can be laid out and painted.
pub trait RenderBox: Paintable + Send {
    /// Lay out under `constraints` and return the chosen size.
    ///
    /// The returned size must satisfy the constraints.
    fn layout(&mut self, constraints: BoxConstraints) -> Size;

    /// The size chosen by the last [`layout`](Self::layout).
    fn size(&self) -> Size;

    /// A short name for logs and debug output.
    fn debug_label(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Dirty-flag notifications a render node sends to its host pipeline.
///
/// Calls are notifications only; the host decides when to run the next
/// layout, paint or semantics pass.
pub trait RenderHost: Send + Sync {
    /// The node's size may have changed.
    fn mark_needs_layout(&self);

    /// The node must be repainted.
    fn mark_needs_paint(&self);

    /// The node's semantics subtree changed.
    fn mark_needs_semantics_update(&self);

    /// Whether the node needs compositing changed; this propagates to ancestors.
    fn mark_needs_compositing_bits_update(&self);
}

/// Which of a two-child node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildSlot {
    /// The child being transitioned from.
    First,
    /// The child being transitioned to.
    Second,
}

impl ChildSlot {
    /// Position in paint order.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            ChildSlot::First => 0,
            ChildSlot::Second => 1,
        }
    }
}

impl fmt::Display for ChildSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChildSlot::First => "first",
            ChildSlot::Second => "second",
        })
    }
}
