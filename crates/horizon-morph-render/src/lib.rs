//! Geometry, compositing layers and the paint context for Horizon Morph.
//!
//! This crate is the rendering side of the morph node's host contract:
//!
//! - [`Point`], [`Size`], [`Rect`]: layout and paint geometry
//! - [`LayerTree`]: an arena of compositing layers retained across frames
//! - [`PaintContext`]: the trait render nodes paint through
//! - [`RecordingContext`]: a `PaintContext` that records into a `LayerTree`
//!
//! # Example
//!
//! ```
//! use horizon_morph_render::{
//!     LayerTree, PaintContext, Picture, Point, Rect, RecordingContext,
//! };
//!
//! let mut tree = LayerTree::new();
//!
//! let mut ctx = RecordingContext::begin(&mut tree);
//! let layer = ctx.push_opacity(
//!     Point::ZERO,
//!     128,
//!     &mut |ctx, offset| {
//!         ctx.add_picture(Picture::new("content", Rect::new(offset.x, offset.y, 10.0, 10.0)));
//!     },
//!     None,
//! );
//! ctx.finish().unwrap();
//!
//! // Next frame: hand the layer back so it is updated in place.
//! let mut ctx = RecordingContext::begin(&mut tree);
//! let again = ctx.push_opacity(Point::ZERO, 200, &mut |_, _| {}, Some(layer));
//! ctx.finish().unwrap();
//! assert_eq!(layer, again);
//! ```

mod error;
pub mod layer;
pub mod paint;
mod types;

pub use error::{LayerError, LayerResult};
pub use layer::{Layer, LayerContent, LayerId, LayerKind, LayerStats, LayerTree, PushedLayer};
pub use paint::{
    ClipBehavior, FrameRecording, PaintContext, PaintOp, Paintable, Painter, Picture,
    RecordingContext,
};
pub use types::{Point, Rect, Size};
