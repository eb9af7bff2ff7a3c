//! Counting dirty-flag collector.
//!
//! [`FrameInvalidation`] is a [`RenderHost`] that simply counts what it was
//! told. A host pipeline drains it once per frame with
//! [`take`](FrameInvalidation::take) to decide which phases to run.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::render_box::RenderHost;

/// Number of each notification received since the last drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvalidationCounts {
    pub layout: usize,
    pub paint: usize,
    pub semantics: usize,
    pub compositing_bits: usize,
}

impl InvalidationCounts {
    /// Whether nothing was marked.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A [`RenderHost`] that counts notifications.
#[derive(Debug, Default)]
pub struct FrameInvalidation {
    layout: AtomicUsize,
    paint: AtomicUsize,
    semantics: AtomicUsize,
    compositing_bits: AtomicUsize,
}

impl FrameInvalidation {
    /// Create a collector with all counts at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counts.
    pub fn counts(&self) -> InvalidationCounts {
        InvalidationCounts {
            layout: self.layout.load(Ordering::Acquire),
            paint: self.paint.load(Ordering::Acquire),
            semantics: self.semantics.load(Ordering::Acquire),
            compositing_bits: self.compositing_bits.load(Ordering::Acquire),
        }
    }

    /// Return the current counts and reset them to zero.
    pub fn take(&self) -> InvalidationCounts {
        InvalidationCounts {
            layout: self.layout.swap(0, Ordering::AcqRel),
            paint: self.paint.swap(0, Ordering::AcqRel),
            semantics: self.semantics.swap(0, Ordering::AcqRel),
            compositing_bits: self.compositing_bits.swap(0, Ordering::AcqRel),
        }
    }

    #[inline]
    pub fn needs_layout(&self) -> bool {
        self.layout.load(Ordering::Acquire) > 0
    }

    #[inline]
    pub fn needs_paint(&self) -> bool {
        self.paint.load(Ordering::Acquire) > 0
    }

    #[inline]
    pub fn needs_semantics_update(&self) -> bool {
        self.semantics.load(Ordering::Acquire) > 0
    }

    #[inline]
    pub fn needs_compositing_bits_update(&self) -> bool {
        self.compositing_bits.load(Ordering::Acquire) > 0
    }
}

impl RenderHost for FrameInvalidation {
    fn mark_needs_layout(&self) {
        self.layout.fetch_add(1, Ordering::AcqRel);
    }

    fn mark_needs_paint(&self) {
        self.paint.fetch_add(1, Ordering::AcqRel);
    }

    fn mark_needs_semantics_update(&self) {
        self.semantics.fetch_add(1, Ordering::AcqRel);
    }

    fn mark_needs_compositing_bits_update(&self) {
        self.compositing_bits.fetch_add(1, Ordering::AcqRel);
    }
}
