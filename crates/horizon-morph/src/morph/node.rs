//! The morph render node.

use std::cell::Cell;
use std::fmt;
use std::mem;
use std::sync::Arc;

use horizon_morph_core::logging::{span_names, targets};
use horizon_morph_core::{PerfSpan, ProgressSource, Subscription};
use horizon_morph_render::{
    ClipBehavior, LayerId, PaintContext, Paintable, Point, Rect, Size,
};
use parking_lot::Mutex;
use tracing::{debug, trace};

use super::config::{MorphConfig, MorphNodeBuilder};
use super::state::{Invalidation, MorphState};
use crate::error::{MorphError, MorphResult};
use crate::layout::{AlignmentGeometry, BoxConstraints, StackChild, StackFit, TextDirection};
use crate::render_box::{ChildSlot, RenderBox, RenderHost};

/// Layer handles a [`MorphNode`] kept from its last paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CachedLayers {
    /// Opacity layer holding the first child.
    pub first: Option<LayerId>,
    /// Opacity layer holding the second child.
    pub second: Option<LayerId>,
    /// Clip layer wrapping both opacity layers.
    pub clip: Option<LayerId>,
}

impl CachedLayers {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Default)]
struct LayerHandles {
    first: Cell<Option<LayerId>>,
    second: Cell<Option<LayerId>>,
    clip: Cell<Option<LayerId>>,
}

impl LayerHandles {
    fn snapshot(&self) -> CachedLayers {
        CachedLayers {
            first: self.first.get(),
            second: self.second.get(),
            clip: self.clip.get(),
        }
    }

    fn clear(&self) {
        self.first.set(None);
        self.second.set(None);
        self.clip.set(None);
    }
}

struct Attachment {
    subscription: Subscription,
    host: Arc<dyn RenderHost>,
}

/// A two-child node that cross-fades from its first child to its second.
///
/// The node follows a [`ProgressSource`]. Its reported size interpolates
/// between the children's sizes, both children are composited through
/// opacity layers while the progress is strictly between the endpoints, and
/// semantics only ever sees the dominant child.
///
/// # Lifecycle
///
/// Nodes are built detached with [`MorphNodeBuilder`]. [`attach`](Self::attach)
/// subscribes to the progress source and starts sending dirty notifications
/// to the host; [`detach`](Self::detach) unsubscribes. Changes made while
/// detached are collected and reported on the next attach.
///
/// ```
/// use std::sync::Arc;
/// use horizon_morph::{
///     AnimationProgress, BoxConstraints, FrameInvalidation, MorphNode, ProgressSource,
///     RenderHost,
/// };
/// # use horizon_morph::{PaintContext, Paintable, Point, RenderBox, Size};
/// # struct Empty(Size);
/// # impl Paintable for Empty { fn paint(&self, _: &mut dyn PaintContext, _: Point) {} }
/// # impl RenderBox for Empty {
/// #     fn layout(&mut self, c: BoxConstraints) -> Size { c.constrain(self.0) }
/// #     fn size(&self) -> Size { self.0 }
/// # }
///
/// let progress = Arc::new(AnimationProgress::new(0.0));
/// let mut node = MorphNode::builder()
///     .progress(progress.clone() as Arc<dyn ProgressSource>)
///     .first_child(Box::new(Empty(Size::new(100.0, 50.0))))
///     .second_child(Box::new(Empty(Size::new(200.0, 100.0))))
///     .build()
///     .unwrap();
///
/// let host = Arc::new(FrameInvalidation::new());
/// node.attach(host.clone() as Arc<dyn RenderHost>).unwrap();
///
/// progress.set_value(0.5).unwrap();
/// assert!(host.needs_layout());
/// assert_eq!(node.layout(BoxConstraints::unbounded()), Size::new(150.0, 75.0));
/// ```
pub struct MorphNode {
    config: MorphConfig,
    children: [StackChild; 2],
    progress: Arc<dyn ProgressSource>,
    state: Arc<Mutex<MorphState>>,
    attachment: Option<Attachment>,
    pending: Invalidation,
    size: Option<Size>,
    layers: LayerHandles,
}

impl MorphNode {
    /// Start building a node.
    pub fn builder() -> MorphNodeBuilder {
        MorphNodeBuilder::new()
    }

    pub(super) fn from_parts(
        config: MorphConfig,
        progress: Arc<dyn ProgressSource>,
        children: [StackChild; 2],
    ) -> Self {
        Self {
            config,
            children,
            progress,
            state: Arc::new(Mutex::new(MorphState::new())),
            attachment: None,
            pending: Invalidation::NONE,
            size: None,
            layers: LayerHandles::default(),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attach to `host`: subscribe to the progress source and recompute.
    ///
    /// Anything invalidated while detached is reported to `host` together with
    /// the recompute.
    pub fn attach(&mut self, host: Arc<dyn RenderHost>) -> MorphResult<()> {
        if self.attachment.is_some() {
            return Err(MorphError::AlreadyAttached);
        }

        let subscription = self.subscribe(&host);
        debug!(
            target: targets::MORPH,
            subscription = ?subscription.id(),
            "morph node attached"
        );
        self.attachment = Some(Attachment { subscription, host });

        let invalidation = mem::take(&mut self.pending) | self.update_state();
        self.invalidate(invalidation);
        Ok(())
    }

    /// Unsubscribe from the progress source, then release the host.
    ///
    /// Does nothing when already detached.
    pub fn detach(&mut self) {
        if let Some(Attachment { subscription, host }) = self.attachment.take() {
            let id = subscription.id();
            drop(subscription);
            drop(host);
            debug!(target: targets::MORPH, subscription = ?id, "morph node detached");
        }
    }

    /// Detach and release every cached layer.
    pub fn dispose(&mut self) {
        self.detach();
        self.layers.clear();
        self.pending = Invalidation::NONE;
    }

    /// Whether the node is attached to a host.
    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Swap the progress source.
    ///
    /// The same source (by identity) is a no-op. When attached, the old source
    /// is unsubscribed before the new one is subscribed. The node always
    /// recomputes against the new source; while detached the resulting marks
    /// are queued for the next attach.
    pub fn set_progress_source(&mut self, progress: Arc<dyn ProgressSource>) {
        if Arc::ptr_eq(&self.progress, &progress) {
            return;
        }

        let host = self.attachment.take().map(|Attachment { subscription, host }| {
            drop(subscription);
            host
        });
        self.progress = progress;
        debug!(target: targets::MORPH, value = self.progress.value(), "progress source replaced");

        if let Some(host) = host {
            let subscription = self.subscribe(&host);
            self.attachment = Some(Attachment { subscription, host });
        }
        self.recompute();
    }

    /// The progress source driving the node.
    pub fn progress_source(&self) -> &Arc<dyn ProgressSource> {
        &self.progress
    }

    /// Re-read the progress source and report what changed.
    ///
    /// The returned invalidation has already been sent to the host, or queued
    /// for the next attach when detached.
    pub fn recompute(&mut self) -> Invalidation {
        let invalidation = self.update_state();
        self.invalidate(invalidation);
        invalidation
    }

    fn update_state(&self) -> Invalidation {
        let value = self.progress.value();
        let mut state = self.state.lock();
        let invalidation = state.update(value);
        trace!(
            target: targets::MORPH,
            value,
            alpha = ?state.alpha(),
            ?invalidation,
            "recompute"
        );
        invalidation
    }

    fn subscribe(&self, host: &Arc<dyn RenderHost>) -> Subscription {
        let state = Arc::downgrade(&self.state);
        let host = Arc::downgrade(host);
        Subscription::new(&self.progress, move |value| {
            let _span = tracing::trace_span!(target: targets::MORPH, span_names::RECOMPUTE).entered();
            let Some(state) = state.upgrade() else {
                return;
            };
            let invalidation = state.lock().update(value);
            trace!(target: targets::MORPH, value, ?invalidation, "progress changed");
            if let Some(host) = host.upgrade() {
                invalidation.apply(host.as_ref());
            }
        })
    }

    fn invalidate(&mut self, invalidation: Invalidation) {
        if invalidation.is_empty() {
            return;
        }
        match &self.attachment {
            Some(attachment) => invalidation.apply(attachment.host.as_ref()),
            None => self.pending |= invalidation,
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The current configuration.
    #[inline]
    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    pub fn set_alignment(&mut self, alignment: impl Into<AlignmentGeometry>) {
        let alignment = alignment.into();
        if self.config.alignment != alignment {
            self.config.alignment = alignment;
            self.invalidate(Invalidation::LAYOUT);
        }
    }

    pub fn set_text_direction(&mut self, text_direction: TextDirection) {
        if self.config.text_direction != text_direction {
            self.config.text_direction = text_direction;
            self.invalidate(Invalidation::LAYOUT);
        }
    }

    pub fn set_fit(&mut self, fit: StackFit) {
        if self.config.fit != fit {
            self.config.fit = fit;
            self.invalidate(Invalidation::LAYOUT);
        }
    }

    pub fn set_clip_behavior(&mut self, clip_behavior: ClipBehavior) {
        if self.config.clip_behavior != clip_behavior {
            self.config.clip_behavior = clip_behavior;
            self.invalidate(Invalidation::PAINT);
        }
    }

    pub fn set_resize_children_when_animating(&mut self, resize: bool) {
        if self.config.resize_children_when_animating != resize {
            self.config.resize_children_when_animating = resize;
            self.invalidate(Invalidation::LAYOUT);
        }
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Alpha derived from the last observed progress (`None` before the first
    /// recompute).
    pub fn alpha(&self) -> Option<u8> {
        self.state.lock().alpha()
    }

    /// The last observed progress value.
    pub fn progress_value(&self) -> Option<f32> {
        self.state.lock().last_value()
    }

    /// Whether the node must be composited: true strictly between the
    /// endpoints.
    pub fn always_needs_compositing(&self) -> bool {
        self.state.lock().compositing_enabled()
    }

    /// Size from the last layout.
    #[inline]
    pub fn laid_out_size(&self) -> Option<Size> {
        self.size
    }

    /// Layer handles kept from the last paint.
    pub fn cached_layers(&self) -> CachedLayers {
        self.layers.snapshot()
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// The child in `slot`.
    pub fn child(&self, slot: ChildSlot) -> &dyn RenderBox {
        self.children[slot.index()].render()
    }

    /// Mutable access to the child in `slot`.
    pub fn child_mut(&mut self, slot: ChildSlot) -> &mut dyn RenderBox {
        self.children[slot.index()].render_mut()
    }

    /// Where the child in `slot` was placed by the last layout.
    pub fn child_offset(&self, slot: ChildSlot) -> Point {
        self.children[slot.index()].offset()
    }

    /// Replace the child in `slot`, returning the previous one.
    ///
    /// Replacing the child semantics currently sees also marks semantics.
    pub fn replace_child(&mut self, slot: ChildSlot, child: Box<dyn RenderBox>) -> Box<dyn RenderBox> {
        let old = self.children[slot.index()].replace(child);
        debug!(target: targets::MORPH, %slot, "child replaced");
        let mut invalidation = Invalidation::LAYOUT;
        invalidation.semantics = slot == self.semantics_child();
        self.invalidate(invalidation);
        old
    }

    // =========================================================================
    // Semantics
    // =========================================================================

    /// The child exposed to semantics: second when alpha is above 128.
    pub fn semantics_child(&self) -> ChildSlot {
        self.state.lock().semantics_child()
    }

    /// Visit the one child semantics should see.
    pub fn visit_children_for_semantics(&self, visitor: &mut dyn FnMut(ChildSlot, &dyn RenderBox)) {
        let slot = self.semantics_child();
        visitor(slot, self.child(slot));
    }

    // =========================================================================
    // Paint helpers
    // =========================================================================

    fn paint_child_at(&self, ctx: &mut dyn PaintContext, slot: ChildSlot, offset: Point) {
        let child = &self.children[slot.index()];
        ctx.paint_child(child.render(), offset + child.offset());
    }

    fn paint_with_opacity(&self, ctx: &mut dyn PaintContext, offset: Point, alpha: u8) {
        let first = ctx.push_opacity(
            offset,
            u8::MAX - alpha,
            &mut |ctx: &mut dyn PaintContext, origin: Point| {
                self.paint_child_at(ctx, ChildSlot::First, origin)
            },
            self.layers.first.get(),
        );
        self.layers.first.set(Some(first));

        let second = ctx.push_opacity(
            offset,
            alpha,
            &mut |ctx: &mut dyn PaintContext, origin: Point| {
                self.paint_child_at(ctx, ChildSlot::Second, origin)
            },
            self.layers.second.get(),
        );
        self.layers.second.set(Some(second));
    }

    fn needs_clip(&self) -> bool {
        !self.config.resize_children_when_animating
            && self.config.clip_behavior != ClipBehavior::None
            && self.children[0].size() != self.children[1].size()
    }
}

impl Paintable for MorphNode {
    fn paint(&self, ctx: &mut dyn PaintContext, offset: Point) {
        let _perf = PerfSpan::new(span_names::PAINT);
        debug_assert!(self.size.is_some(), "MorphNode painted before layout");

        let alpha = self.alpha().unwrap_or(0);
        match alpha {
            u8::MAX => {
                trace!(target: targets::MORPH, "paint second child opaque");
                self.layers.clear();
                self.paint_child_at(ctx, ChildSlot::Second, offset);
            }
            0 => {
                trace!(target: targets::MORPH, "paint first child opaque");
                self.layers.clear();
                self.paint_child_at(ctx, ChildSlot::First, offset);
            }
            _ if self.needs_clip() => {
                trace!(target: targets::MORPH, alpha, "paint morph clipped");
                let bounds = Rect::from_origin_size(Point::ZERO, self.size.unwrap_or(Size::ZERO));
                let clip = ctx.push_clip_rect(
                    true,
                    offset,
                    bounds,
                    &mut |ctx: &mut dyn PaintContext, origin: Point| {
                        self.paint_with_opacity(ctx, origin, alpha)
                    },
                    self.config.clip_behavior,
                    self.layers.clip.get(),
                );
                self.layers.clip.set(clip);
            }
            _ => {
                trace!(target: targets::MORPH, alpha, "paint morph unclipped");
                self.layers.clip.set(None);
                self.paint_with_opacity(ctx, offset, alpha);
            }
        }
    }
}

impl RenderBox for MorphNode {
    fn layout(&mut self, constraints: BoxConstraints) -> Size {
        let _perf = PerfSpan::new(span_names::LAYOUT);
        debug_assert!(
            constraints.is_normalized(),
            "MorphNode laid out with invalid constraints {constraints:?}"
        );

        let child_constraints = self.config.fit.child_constraints(constraints);
        let [first, second] = &mut self.children;
        let first_size = first.layout(child_constraints);
        let second_size = second.layout(child_constraints);

        let t = self.state.lock().last_value().unwrap_or(0.0);
        let size = constraints.constrain(first_size.lerp(second_size, t));

        if self.config.resize_children_when_animating {
            let tight = BoxConstraints::tight(size);
            first.layout(tight);
            second.layout(tight);
        }

        let alignment = self.config.alignment.resolve(self.config.text_direction);
        first.place(alignment, size);
        second.place(alignment, size);

        trace!(
            target: targets::LAYOUT,
            t,
            width = size.width,
            height = size.height,
            "morph layout"
        );
        self.size = Some(size);
        size
    }

    fn size(&self) -> Size {
        self.size.unwrap_or(Size::ZERO)
    }

    fn debug_label(&self) -> &str {
        "MorphNode"
    }
}

impl fmt::Debug for MorphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MorphNode")
            .field("config", &self.config)
            .field("children", &self.children)
            .field("state", &*self.state.lock())
            .field("attached", &self.is_attached())
            .field("pending", &self.pending)
            .field("size", &self.size)
            .field("layers", &self.layers.snapshot())
            .finish()
    }
}
