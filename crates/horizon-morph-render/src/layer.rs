//! Retained compositing layers.
//!
//! This module provides [`LayerTree`], an arena of compositing layers that
//! survives across frames. Render nodes hold [`LayerId`] handles to the layers
//! they pushed last frame and hand them back as `old_layer` when painting the
//! next one; the arena then updates the existing layer in place instead of
//! allocating a new one.
//!
//! # Frame lifecycle
//!
//! 1. [`begin_frame`](LayerTree::begin_frame) clears the root's contents
//! 2. painting pushes layers (new or reused) and pictures under the root
//! 3. [`end_frame`](LayerTree::end_frame) releases every layer that was not
//!    pushed during the frame
//!
//! A handle to a released layer is simply stale: passing it as `old_layer`
//! allocates a fresh layer.

use std::mem;

use slotmap::{SlotMap, new_key_type};
use tracing::{debug, trace};

use crate::error::{LayerError, LayerResult};
use crate::paint::{ClipBehavior, Picture};
use crate::types::{Point, Rect};

new_key_type! {
    /// Handle to a layer in a [`LayerTree`].
    pub struct LayerId;
}

/// What a layer does to its contents.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    /// The tree root. Exactly one per tree.
    Root,
    /// Composites its contents at `alpha` (0 = transparent, 255 = opaque),
    /// translated by `offset`.
    Opacity { alpha: u8, offset: Point },
    /// Clips its contents to `rect`.
    ClipRect { rect: Rect, clip_behavior: ClipBehavior },
}

impl LayerKind {
    fn same_variant(&self, other: &LayerKind) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }
}

/// An entry in a layer's content list.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerContent {
    /// Recorded drawing.
    Picture(Picture),
    /// A child layer.
    Layer(LayerId),
}

/// A layer in the tree.
#[derive(Debug, Clone)]
pub struct Layer {
    kind: LayerKind,
    contents: Vec<LayerContent>,
    last_used_frame: u64,
}

impl Layer {
    /// What this layer does.
    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    /// Contents pushed into this layer during its last frame.
    pub fn contents(&self) -> &[LayerContent] {
        &self.contents
    }
}

/// Allocation counters for a [`LayerTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerStats {
    /// Layers allocated.
    pub created: u64,
    /// Pushes satisfied by updating an existing layer.
    pub reused: u64,
    /// Layers released by frame sweeps.
    pub released: u64,
}

/// Result of pushing a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushedLayer {
    /// The layer now holding the contents.
    pub id: LayerId,
    /// Whether `id` is the `old_layer` that was passed in.
    pub reused: bool,
}

/// An arena of compositing layers retained across frames.
#[derive(Debug)]
pub struct LayerTree {
    layers: SlotMap<LayerId, Layer>,
    root: LayerId,
    frame: u64,
    stats: LayerStats,
}

impl LayerTree {
    /// Create a tree containing only the root layer.
    pub fn new() -> Self {
        let mut layers = SlotMap::with_key();
        let root = layers.insert(Layer {
            kind: LayerKind::Root,
            contents: Vec::new(),
            last_used_frame: 0,
        });
        Self {
            layers,
            root,
            frame: 0,
            stats: LayerStats::default(),
        }
    }

    /// The root layer.
    #[inline]
    pub fn root(&self) -> LayerId {
        self.root
    }

    /// The current frame number (0 before the first frame).
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Number of live layers, including the root.
    #[inline]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the tree holds only the root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.len() == 1
    }

    /// Allocation counters.
    #[inline]
    pub fn stats(&self) -> LayerStats {
        self.stats
    }

    /// Whether `id` refers to a live layer.
    #[inline]
    pub fn contains(&self, id: LayerId) -> bool {
        self.layers.contains_key(id)
    }

    /// Look up a layer.
    pub fn layer(&self, id: LayerId) -> LayerResult<&Layer> {
        self.layers.get(id).ok_or(LayerError::UnknownLayer(id))
    }

    /// Start a new frame: bump the frame counter and clear the root.
    pub fn begin_frame(&mut self) -> u64 {
        self.frame += 1;
        let frame = self.frame;
        let root = &mut self.layers[self.root];
        root.contents.clear();
        root.last_used_frame = frame;
        trace!(target: "horizon_morph_render::layer", frame, "begin frame");
        frame
    }

    /// Finish the frame, releasing every layer not pushed during it.
    ///
    /// Returns the number of layers released.
    pub fn end_frame(&mut self) -> usize {
        let frame = self.frame;
        let before = self.layers.len();
        self.layers.retain(|_, layer| layer.last_used_frame == frame);
        let released = before - self.layers.len();
        self.stats.released += released as u64;
        if released > 0 {
            debug!(target: "horizon_morph_render::layer", frame, released, "released stale layers");
        }
        released
    }

    /// Push a layer of `kind` under `parent`.
    ///
    /// If `old_layer` is live, of the same variant and not yet used this frame,
    /// it is updated in place; otherwise a new layer is allocated.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a live layer.
    pub fn push_layer(
        &mut self,
        parent: LayerId,
        kind: LayerKind,
        old_layer: Option<LayerId>,
    ) -> PushedLayer {
        assert!(
            self.layers.contains_key(parent),
            "push_layer: unknown parent layer {parent:?}"
        );
        debug_assert!(kind != LayerKind::Root, "the root layer cannot be pushed");

        let frame = self.frame;
        let reusable = old_layer.filter(|&id| {
            self.layers.get(id).is_some_and(|layer| {
                id != self.root
                    && layer.last_used_frame != frame
                    && layer.kind.same_variant(&kind)
            })
        });

        let pushed = match reusable {
            Some(id) => {
                let layer = &mut self.layers[id];
                layer.kind = kind;
                layer.contents.clear();
                layer.last_used_frame = frame;
                self.stats.reused += 1;
                PushedLayer { id, reused: true }
            }
            None => {
                let id = self.layers.insert(Layer {
                    kind,
                    contents: Vec::new(),
                    last_used_frame: frame,
                });
                self.stats.created += 1;
                debug!(target: "horizon_morph_render::layer", ?id, frame, "allocated layer");
                PushedLayer { id, reused: false }
            }
        };

        self.layers[parent]
            .contents
            .push(LayerContent::Layer(pushed.id));
        pushed
    }

    /// Append a picture to `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a live layer.
    pub fn add_picture(&mut self, parent: LayerId, picture: Picture) {
        match self.layers.get_mut(parent) {
            Some(layer) => layer.contents.push(LayerContent::Picture(picture)),
            None => panic!("add_picture: unknown parent layer {parent:?}"),
        }
    }
}

impl Default for LayerTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Size;

    fn opacity(alpha: u8) -> LayerKind {
        LayerKind::Opacity {
            alpha,
            offset: Point::ZERO,
        }
    }

    #[test]
    fn test_new_tree_has_only_root() {
        let tree = LayerTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.layer(tree.root()).unwrap().kind(), &LayerKind::Root);
    }

    #[test]
    fn test_reuse_across_frames() {
        let mut tree = LayerTree::new();
        let root = tree.root();

        tree.begin_frame();
        let first = tree.push_layer(root, opacity(10), None);
        assert!(!first.reused);
        assert_eq!(tree.end_frame(), 0);

        tree.begin_frame();
        let second = tree.push_layer(root, opacity(20), Some(first.id));
        assert!(second.reused);
        assert_eq!(second.id, first.id);
        assert_eq!(tree.layer(first.id).unwrap().kind(), &opacity(20));

        assert_eq!(tree.stats().created, 1);
        assert_eq!(tree.stats().reused, 1);
    }

    #[test]
    fn test_variant_mismatch_allocates() {
        let mut tree = LayerTree::new();
        let root = tree.root();

        tree.begin_frame();
        let clip = tree.push_layer(
            root,
            LayerKind::ClipRect {
                rect: Rect::from_origin_size(Point::ZERO, Size::new(10.0, 10.0)),
                clip_behavior: ClipBehavior::HardEdge,
            },
            None,
        );
        tree.end_frame();

        tree.begin_frame();
        let pushed = tree.push_layer(root, opacity(1), Some(clip.id));
        assert!(!pushed.reused);
        assert_ne!(pushed.id, clip.id);
    }

    #[test]
    fn test_same_layer_not_reused_twice_in_a_frame() {
        let mut tree = LayerTree::new();
        let root = tree.root();

        tree.begin_frame();
        let a = tree.push_layer(root, opacity(1), None);
        let b = tree.push_layer(root, opacity(2), Some(a.id));
        assert!(!b.reused);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_unused_layers_are_swept() {
        let mut tree = LayerTree::new();
        let root = tree.root();

        tree.begin_frame();
        let layer = tree.push_layer(root, opacity(128), None);
        tree.end_frame();
        assert!(tree.contains(layer.id));

        tree.begin_frame();
        assert_eq!(tree.end_frame(), 1);
        assert!(!tree.contains(layer.id));
        assert!(matches!(
            tree.layer(layer.id),
            Err(LayerError::UnknownLayer(_))
        ));

        // A stale handle simply allocates.
        tree.begin_frame();
        assert!(!tree.push_layer(root, opacity(128), Some(layer.id)).reused);
    }

    #[test]
    fn test_contents_nest() {
        let mut tree = LayerTree::new();
        let root = tree.root();

        tree.begin_frame();
        let layer = tree.push_layer(root, opacity(64), None);
        tree.add_picture(layer.id, Picture::new("leaf", Rect::new(0.0, 0.0, 4.0, 4.0)));

        assert_eq!(
            tree.layer(root).unwrap().contents(),
            &[LayerContent::Layer(layer.id)]
        );
        assert_eq!(tree.layer(layer.id).unwrap().contents().len(), 1);
    }
}
