//! Horizon Morph - cross-fade transitions between two render subtrees.
//!
//! This is the main crate. It provides the [`MorphNode`] render node together
//! with the layout seams it needs, and re-exports the core and render crates
//! so hosts only depend on one crate.
//!
//! # Crates
//!
//! - `horizon-morph-core`: signals, progress sources, logging
//! - `horizon-morph-render`: geometry, retained layers, the paint context
//! - `horizon-morph`: box constraints, stack alignment, [`MorphNode`]
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_morph::prelude::*;
//!
//! struct Swatch {
//!     name: &'static str,
//!     natural: Size,
//!     size: Size,
//! }
//!
//! impl Paintable for Swatch {
//!     fn paint(&self, ctx: &mut dyn PaintContext, offset: Point) {
//!         ctx.add_picture(Picture::new(self.name, Rect::from_origin_size(offset, self.size)));
//!     }
//! }
//!
//! impl RenderBox for Swatch {
//!     fn layout(&mut self, constraints: BoxConstraints) -> Size {
//!         self.size = constraints.constrain(self.natural);
//!         self.size
//!     }
//!
//!     fn size(&self) -> Size {
//!         self.size
//!     }
//! }
//!
//! let progress = Arc::new(AnimationProgress::new(0.25));
//! let mut node = MorphNode::builder()
//!     .progress(progress.clone())
//!     .first_child(Box::new(Swatch { name: "from", natural: Size::new(40.0, 40.0), size: Size::ZERO }))
//!     .second_child(Box::new(Swatch { name: "to", natural: Size::new(80.0, 40.0), size: Size::ZERO }))
//!     .build()?;
//! node.attach(Arc::new(FrameInvalidation::new()))?;
//!
//! let mut layers = LayerTree::new();
//! node.layout(BoxConstraints::unbounded());
//! let mut ctx = RecordingContext::begin(&mut layers);
//! ctx.paint_child(&node, Point::ZERO);
//! let frame = ctx.finish()?;
//!
//! assert_eq!(frame.picture_labels(), vec!["from", "to"]);
//! assert_eq!(frame.opacity_layers(), vec![(191, false), (64, false)]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod invalidation;
pub mod layout;
pub mod morph;
pub mod prelude;
mod render_box;

pub use horizon_morph_core::*;
pub use horizon_morph_render::{
    ClipBehavior, FrameRecording, Layer, LayerContent, LayerError, LayerId, LayerKind,
    LayerResult, LayerStats, LayerTree, PaintContext, PaintOp, Paintable, Painter, Picture, Point,
    PushedLayer, Rect, RecordingContext, Size,
};

/// Geometry, layers and the paint context.
pub mod render {
    pub use horizon_morph_render::*;
}

pub use error::{MorphError, MorphResult};
pub use invalidation::{FrameInvalidation, InvalidationCounts};
pub use layout::{
    Alignment, AlignmentDirectional, AlignmentGeometry, BoxConstraints, StackChild, StackFit,
    TextDirection,
};
pub use morph::{
    CachedLayers, Invalidation, MorphConfig, MorphNode, MorphNodeBuilder, MorphState,
    opacity_to_alpha,
};
pub use render_box::{ChildSlot, RenderBox, RenderHost};
