//! Stacked child placement.
//!
//! Children of a stack all occupy the same area. [`StackFit`] decides what
//! constraints they are measured under, and each child keeps the offset it was
//! placed at so paint can find it again.

use std::fmt;

use horizon_morph_render::{Point, Size};
use serde::{Deserialize, Serialize};

use super::alignment::Alignment;
use super::constraints::BoxConstraints;
use crate::render_box::RenderBox;

/// How non-positioned children of a stack are sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackFit {
    /// Children may be anything up to the incoming maximums.
    #[default]
    Loose,
    /// Children are forced to the biggest size the constraints allow.
    Expand,
    /// Children receive the incoming constraints unchanged.
    Passthrough,
}

impl StackFit {
    /// The constraints a child is measured under.
    pub fn child_constraints(self, constraints: BoxConstraints) -> BoxConstraints {
        match self {
            StackFit::Loose => constraints.loosen(),
            StackFit::Expand => BoxConstraints::tight(constraints.biggest()),
            StackFit::Passthrough => constraints,
        }
    }
}

/// A child of a stack together with its placement.
pub struct StackChild {
    render: Box<dyn RenderBox>,
    offset: Point,
}

impl StackChild {
    /// Wrap a render box. The offset starts at the origin.
    pub fn new(render: Box<dyn RenderBox>) -> Self {
        Self {
            render,
            offset: Point::ZERO,
        }
    }

    /// The wrapped render box.
    #[inline]
    pub fn render(&self) -> &dyn RenderBox {
        self.render.as_ref()
    }

    /// Mutable access to the wrapped render box.
    #[inline]
    pub fn render_mut(&mut self) -> &mut dyn RenderBox {
        self.render.as_mut()
    }

    /// Offset of the child inside the stack, set by [`place`](Self::place).
    #[inline]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// The child's size from its last layout.
    #[inline]
    pub fn size(&self) -> Size {
        self.render.size()
    }

    /// Lay the child out and return its size.
    pub fn layout(&mut self, constraints: BoxConstraints) -> Size {
        self.render.layout(constraints)
    }

    /// Align the child inside a stack of `container` size.
    pub fn place(&mut self, alignment: Alignment, container: Size) -> Point {
        self.offset = alignment.along_offset(container, self.render.size());
        self.offset
    }

    /// Swap in a new render box, returning the old one.
    pub fn replace(&mut self, render: Box<dyn RenderBox>) -> Box<dyn RenderBox> {
        self.offset = Point::ZERO;
        std::mem::replace(&mut self.render, render)
    }
}

impl fmt::Debug for StackChild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackChild")
            .field("render", &self.render.debug_label())
            .field("size", &self.render.size())
            .field("offset", &self.offset)
            .finish()
    }
}
