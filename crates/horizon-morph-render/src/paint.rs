//! The paint context render nodes draw through.
//!
//! [`PaintContext`] is the host seam: render nodes paint their children, push
//! opacity and clip layers, and record pictures through it without knowing
//! how the host composites. [`RecordingContext`] is the in-tree
//! implementation; it paints into a retained [`LayerTree`] and keeps a flat
//! log of every operation for inspection.

use tracing::trace;

use crate::error::{LayerError, LayerResult};
use crate::layer::{LayerId, LayerKind, LayerTree};
use crate::types::{Point, Rect};

/// How content is clipped to a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClipBehavior {
    /// No clipping; content may paint outside the boundary.
    None,
    /// Clip without anti-aliasing.
    #[default]
    HardEdge,
    /// Clip with anti-aliased edges.
    AntiAlias,
    /// Anti-aliased clip rendered through an intermediate buffer.
    AntiAliasWithSaveLayer,
}

/// Leaf drawing recorded by a render node.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    /// Name used when inspecting recordings.
    pub label: String,
    /// Area covered, in the coordinate space of the enclosing layer.
    pub bounds: Rect,
}

impl Picture {
    /// Create a picture.
    pub fn new(label: impl Into<String>, bounds: Rect) -> Self {
        Self {
            label: label.into(),
            bounds,
        }
    }
}

/// Anything that can paint itself into a [`PaintContext`].
pub trait Paintable {
    /// Paint at `offset` in the context's current coordinate space.
    fn paint(&self, ctx: &mut dyn PaintContext, offset: Point);
}

/// Callback that paints into a pushed layer at the given offset.
pub type Painter<'p> = dyn FnMut(&mut dyn PaintContext, Point) + 'p;

/// Host paint context.
///
/// Layer-pushing methods take the layer returned by the same call on the
/// previous frame as `old_layer`; implementations update it in place when
/// possible.
pub trait PaintContext {
    /// Record a picture in the current layer.
    fn add_picture(&mut self, picture: Picture);

    /// Paint `child` at `offset`.
    fn paint_child(&mut self, child: &dyn Paintable, offset: Point);

    /// Paint into an opacity layer at `offset` composited at `alpha`.
    ///
    /// The painter receives [`Point::ZERO`]: the layer carries the offset.
    fn push_opacity(
        &mut self,
        offset: Point,
        alpha: u8,
        painter: &mut Painter<'_>,
        old_layer: Option<LayerId>,
    ) -> LayerId;

    /// Paint clipped to `clip_rect` (relative to `offset`).
    ///
    /// When `needs_compositing` is set the clip becomes a layer and its handle
    /// is returned; otherwise the clip is applied inline and `None` is
    /// returned. [`ClipBehavior::None`] paints without clipping.
    fn push_clip_rect(
        &mut self,
        needs_compositing: bool,
        offset: Point,
        clip_rect: Rect,
        painter: &mut Painter<'_>,
        clip_behavior: ClipBehavior,
        old_layer: Option<LayerId>,
    ) -> Option<LayerId>;
}

/// One entry in a [`RecordingContext`] log.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    /// A child was painted at this offset.
    PaintChild { offset: Point },
    /// A picture was recorded.
    Picture(Picture),
    /// An opacity layer was pushed.
    PushOpacity {
        layer: LayerId,
        alpha: u8,
        offset: Point,
        reused: bool,
    },
    /// A clip layer was pushed.
    PushClipLayer {
        layer: LayerId,
        rect: Rect,
        clip_behavior: ClipBehavior,
        reused: bool,
    },
    /// The most recently pushed layer was popped.
    PopLayer,
    /// An inline (non-composited) clip was applied.
    ClipRect { rect: Rect, clip_behavior: ClipBehavior },
    /// The most recent inline clip was restored.
    RestoreClip,
}

/// Summary of a recorded frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecording {
    /// Frame number in the layer tree.
    pub frame: u64,
    /// Every operation in paint order.
    pub ops: Vec<PaintOp>,
    /// Layers released at the end of the frame.
    pub released: usize,
}

impl FrameRecording {
    /// Labels of recorded pictures, in paint order.
    pub fn picture_labels(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                PaintOp::Picture(picture) => Some(picture.label.as_str()),
                _ => None,
            })
            .collect()
    }

    /// `(alpha, reused)` for each opacity layer pushed, in paint order.
    pub fn opacity_layers(&self) -> Vec<(u8, bool)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                PaintOp::PushOpacity { alpha, reused, .. } => Some((*alpha, *reused)),
                _ => None,
            })
            .collect()
    }

    /// Number of layers (opacity or clip) pushed.
    pub fn layer_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, PaintOp::PushOpacity { .. } | PaintOp::PushClipLayer { .. }))
            .count()
    }
}

/// A [`PaintContext`] that records into a retained [`LayerTree`].
///
/// Creating the context begins a frame; [`finish`](Self::finish) ends it.
#[derive(Debug)]
pub struct RecordingContext<'a> {
    tree: &'a mut LayerTree,
    stack: Vec<LayerId>,
    ops: Vec<PaintOp>,
}

impl<'a> RecordingContext<'a> {
    /// Begin a frame on `tree`.
    pub fn begin(tree: &'a mut LayerTree) -> Self {
        tree.begin_frame();
        let root = tree.root();
        Self {
            tree,
            stack: vec![root],
            ops: Vec::new(),
        }
    }

    /// Operations recorded so far.
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// The layer currently receiving content.
    pub fn current_layer(&self) -> LayerId {
        self.stack.last().copied().unwrap_or_else(|| self.tree.root())
    }

    /// End the frame, sweeping layers not pushed during it.
    pub fn finish(self) -> LayerResult<FrameRecording> {
        let depth = self.stack.len().saturating_sub(1);
        if depth != 0 {
            return Err(LayerError::UnbalancedLayers { depth });
        }
        let released = self.tree.end_frame();
        Ok(FrameRecording {
            frame: self.tree.frame(),
            ops: self.ops,
            released,
        })
    }

    fn with_layer(&mut self, layer: LayerId, offset: Point, painter: &mut Painter<'_>) {
        self.stack.push(layer);
        painter(self, offset);
        self.stack.pop();
        self.ops.push(PaintOp::PopLayer);
    }
}

impl PaintContext for RecordingContext<'_> {
    fn add_picture(&mut self, picture: Picture) {
        let parent = self.current_layer();
        self.ops.push(PaintOp::Picture(picture.clone()));
        self.tree.add_picture(parent, picture);
    }

    fn paint_child(&mut self, child: &dyn Paintable, offset: Point) {
        self.ops.push(PaintOp::PaintChild { offset });
        child.paint(self, offset);
    }

    fn push_opacity(
        &mut self,
        offset: Point,
        alpha: u8,
        painter: &mut Painter<'_>,
        old_layer: Option<LayerId>,
    ) -> LayerId {
        let parent = self.current_layer();
        let pushed = self
            .tree
            .push_layer(parent, LayerKind::Opacity { alpha, offset }, old_layer);
        trace!(
            target: "horizon_morph_render::paint",
            layer = ?pushed.id,
            alpha,
            reused = pushed.reused,
            "push opacity"
        );
        self.ops.push(PaintOp::PushOpacity {
            layer: pushed.id,
            alpha,
            offset,
            reused: pushed.reused,
        });
        self.with_layer(pushed.id, Point::ZERO, painter);
        pushed.id
    }

    fn push_clip_rect(
        &mut self,
        needs_compositing: bool,
        offset: Point,
        clip_rect: Rect,
        painter: &mut Painter<'_>,
        clip_behavior: ClipBehavior,
        old_layer: Option<LayerId>,
    ) -> Option<LayerId> {
        if clip_behavior == ClipBehavior::None {
            painter(self, offset);
            return None;
        }

        let rect = clip_rect.translate(offset);
        if needs_compositing {
            let parent = self.current_layer();
            let pushed = self.tree.push_layer(
                parent,
                LayerKind::ClipRect {
                    rect,
                    clip_behavior,
                },
                old_layer,
            );
            trace!(
                target: "horizon_morph_render::paint",
                layer = ?pushed.id,
                reused = pushed.reused,
                "push clip layer"
            );
            self.ops.push(PaintOp::PushClipLayer {
                layer: pushed.id,
                rect,
                clip_behavior,
                reused: pushed.reused,
            });
            self.with_layer(pushed.id, offset, painter);
            Some(pushed.id)
        } else {
            self.ops.push(PaintOp::ClipRect {
                rect,
                clip_behavior,
            });
            painter(self, offset);
            self.ops.push(PaintOp::RestoreClip);
            None
        }
    }
}
