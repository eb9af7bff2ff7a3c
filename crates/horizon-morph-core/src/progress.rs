//! Animation progress sources.
//!
//! A progress source is an observable scalar in `0.0..=1.0` that drives a
//! transition. The animation clock that advances it lives outside this crate;
//! consumers only read the current value and subscribe to change
//! notifications.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use horizon_morph_core::progress::{AnimationProgress, ProgressSource, Subscription};
//!
//! let progress = Arc::new(AnimationProgress::new(0.0));
//! let source: Arc<dyn ProgressSource> = progress.clone();
//!
//! let notified = Arc::new(AtomicUsize::new(0));
//! let counter = notified.clone();
//! let subscription = Subscription::new(&source, move |_| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! progress.set_value(0.5).unwrap();
//! assert_eq!(notified.load(Ordering::SeqCst), 1);
//!
//! // Dropping the subscription unsubscribes.
//! drop(subscription);
//! progress.set_value(1.0).unwrap();
//! assert_eq!(notified.load(Ordering::SeqCst), 1);
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::{CoreError, CoreResult};
use crate::logging::targets;
use crate::signal::{ConnectionId, Signal};

/// Callback invoked with the new progress value.
pub type ProgressListener = Box<dyn Fn(f32) + Send + Sync>;

/// An observable number-producer in `0.0..=1.0`.
///
/// Implementations must call listeners synchronously on every value change,
/// before the setter returns.
pub trait ProgressSource: Send + Sync {
    /// The current progress value.
    fn value(&self) -> f32;

    /// Register a listener. Returns an id for [`unsubscribe`](Self::unsubscribe).
    fn subscribe(&self, listener: ProgressListener) -> ConnectionId;

    /// Remove a previously registered listener.
    ///
    /// Returns `false` if the id was unknown.
    fn unsubscribe(&self, id: ConnectionId) -> bool;
}

/// An owned subscription to a progress source.
///
/// The listener stays registered for as long as the subscription lives;
/// dropping it unsubscribes. This pairs every subscribe with exactly one
/// unsubscribe.
pub struct Subscription {
    source: Arc<dyn ProgressSource>,
    id: ConnectionId,
}

impl Subscription {
    /// Subscribe `listener` to `source`.
    pub fn new<F>(source: &Arc<dyn ProgressSource>, listener: F) -> Self
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        let id = source.subscribe(Box::new(listener));
        tracing::trace!(target: targets::PROGRESS, ?id, "subscribed to progress source");
        Self {
            source: Arc::clone(source),
            id,
        }
    }

    /// The connection id held by this subscription.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Whether this subscription listens to `source`.
    pub fn is_for(&self, source: &Arc<dyn ProgressSource>) -> bool {
        Arc::ptr_eq(&self.source, source)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if !self.source.unsubscribe(self.id) {
            tracing::warn!(
                target: targets::PROGRESS,
                id = ?self.id,
                "progress listener was already removed"
            );
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("value", &self.source.value())
            .finish()
    }
}

/// A settable progress value, typically advanced by an animation clock.
///
/// Values are clamped to `0.0..=1.0`. Listeners are notified only when the
/// stored value actually changes.
pub struct AnimationProgress {
    /// Progress stored as u32 bits (f32::to_bits/from_bits for atomic access).
    bits: AtomicU32,
    changed: Signal<f32>,
}

impl AnimationProgress {
    /// Create a progress source starting at `value` (clamped).
    ///
    /// Non-finite values start at `0.0`.
    pub fn new(value: f32) -> Self {
        let initial = if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            bits: AtomicU32::new(initial.to_bits()),
            changed: Signal::new(),
        }
    }

    /// Set the progress value.
    ///
    /// Returns `Ok(true)` if the value changed and listeners were notified.
    pub fn set_value(&self, value: f32) -> CoreResult<bool> {
        if !value.is_finite() {
            tracing::warn!(target: targets::PROGRESS, value, "rejecting non-finite progress");
            return Err(CoreError::InvalidProgress(value));
        }

        let clamped = value.clamp(0.0, 1.0);
        let old = f32::from_bits(self.bits.swap(clamped.to_bits(), Ordering::AcqRel));
        if old == clamped {
            return Ok(false);
        }

        tracing::trace!(target: targets::PROGRESS, old, new = clamped, "progress changed");
        self.changed.emit(clamped);
        Ok(true)
    }

    /// Number of listeners currently subscribed.
    pub fn listener_count(&self) -> usize {
        self.changed.connection_count()
    }
}

impl Default for AnimationProgress {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl ProgressSource for AnimationProgress {
    fn value(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }

    fn subscribe(&self, listener: ProgressListener) -> ConnectionId {
        self.changed.connect(move |&value| listener(value))
    }

    fn unsubscribe(&self, id: ConnectionId) -> bool {
        self.changed.disconnect(id)
    }
}

impl fmt::Debug for AnimationProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationProgress")
            .field("value", &self.value())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// A progress source that never changes.
///
/// Subscriptions are accepted (so the pairing contract holds) but never fire.
pub struct ConstantProgress {
    value: f32,
    listeners: Signal<f32>,
}

impl ConstantProgress {
    /// Pinned at the start of a transition.
    pub fn dismissed() -> Self {
        Self::new(0.0)
    }

    /// Pinned at the end of a transition.
    pub fn completed() -> Self {
        Self::new(1.0)
    }

    /// Pinned at `value` (clamped; non-finite becomes `0.0`).
    pub fn new(value: f32) -> Self {
        Self {
            value: if value.is_finite() {
                value.clamp(0.0, 1.0)
            } else {
                0.0
            },
            listeners: Signal::new(),
        }
    }
}

impl ProgressSource for ConstantProgress {
    fn value(&self) -> f32 {
        self.value
    }

    fn subscribe(&self, listener: ProgressListener) -> ConnectionId {
        self.listeners.connect(move |&value| listener(value))
    }

    fn unsubscribe(&self, id: ConnectionId) -> bool {
        self.listeners.disconnect(id)
    }
}

impl fmt::Debug for ConstantProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConstantProgress").field(&self.value).finish()
    }
}

/// Runs a parent progress source backwards: `value = 1.0 - parent`.
///
/// Parent notifications are relayed to this source's listeners.
pub struct ReverseProgress {
    parent: Arc<dyn ProgressSource>,
    changed: Arc<Signal<f32>>,
    _relay: Subscription,
}

impl ReverseProgress {
    /// Reverse `parent`.
    pub fn new(parent: Arc<dyn ProgressSource>) -> Self {
        let changed = Arc::new(Signal::new());
        let relay_target = Arc::clone(&changed);
        let relay = Subscription::new(&parent, move |value| {
            relay_target.emit(1.0 - value);
        });
        Self {
            parent,
            changed,
            _relay: relay,
        }
    }

    /// The source being reversed.
    pub fn parent(&self) -> &Arc<dyn ProgressSource> {
        &self.parent
    }
}

impl ProgressSource for ReverseProgress {
    fn value(&self) -> f32 {
        1.0 - self.parent.value()
    }

    fn subscribe(&self, listener: ProgressListener) -> ConnectionId {
        self.changed.connect(move |&value| listener(value))
    }

    fn unsubscribe(&self, id: ConnectionId) -> bool {
        self.changed.disconnect(id)
    }
}

impl fmt::Debug for ReverseProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReverseProgress")
            .field("value", &self.value())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn recorder(source: &Arc<dyn ProgressSource>) -> (Subscription, Arc<Mutex<Vec<f32>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let subscription = Subscription::new(source, move |value| sink.lock().push(value));
        (subscription, seen)
    }

    #[test]
    fn test_animation_progress_clamping() {
        let progress = AnimationProgress::new(2.0);
        assert_eq!(progress.value(), 1.0);

        progress.set_value(-0.5).unwrap();
        assert_eq!(progress.value(), 0.0);

        progress.set_value(0.25).unwrap();
        assert_eq!(progress.value(), 0.25);
    }

    #[test]
    fn test_animation_progress_rejects_nan() {
        let progress = AnimationProgress::new(0.3);
        assert!(matches!(
            progress.set_value(f32::NAN),
            Err(CoreError::InvalidProgress(_))
        ));
        assert_eq!(progress.value(), 0.3);
        assert_eq!(AnimationProgress::new(f32::INFINITY).value(), 0.0);
    }

    #[test]
    fn test_notifies_only_on_change() {
        let progress = Arc::new(AnimationProgress::new(0.0));
        let source: Arc<dyn ProgressSource> = progress.clone();
        let (_subscription, seen) = recorder(&source);

        assert!(progress.set_value(0.5).unwrap());
        assert!(!progress.set_value(0.5).unwrap());
        assert!(progress.set_value(1.0).unwrap());
        assert!(!progress.set_value(3.0).unwrap());

        assert_eq!(*seen.lock(), vec![0.5, 1.0]);
    }

    #[test]
    fn test_subscription_drop_unsubscribes() {
        let progress = Arc::new(AnimationProgress::default());
        let source: Arc<dyn ProgressSource> = progress.clone();

        let (subscription, _) = recorder(&source);
        assert_eq!(progress.listener_count(), 1);
        assert!(subscription.is_for(&source));

        drop(subscription);
        assert_eq!(progress.listener_count(), 0);
    }

    #[test]
    fn test_constant_progress_never_fires() {
        let source: Arc<dyn ProgressSource> = Arc::new(ConstantProgress::completed());
        let (subscription, seen) = recorder(&source);
        assert_eq!(source.value(), 1.0);
        assert!(seen.lock().is_empty());
        assert_eq!(ConstantProgress::dismissed().value(), 0.0);
        drop(subscription);
    }

    #[test]
    fn test_reverse_progress_relays() {
        let progress = Arc::new(AnimationProgress::new(0.25));
        let reversed: Arc<dyn ProgressSource> =
            Arc::new(ReverseProgress::new(progress.clone()));
        assert_eq!(reversed.value(), 0.75);

        let (_subscription, seen) = recorder(&reversed);
        progress.set_value(1.0).unwrap();

        assert_eq!(reversed.value(), 0.0);
        assert_eq!(*seen.lock(), vec![0.0]);
    }

    #[test]
    fn test_reverse_progress_releases_parent_on_drop() {
        let progress = Arc::new(AnimationProgress::new(0.0));
        let reversed = ReverseProgress::new(progress.clone());
        assert_eq!(progress.listener_count(), 1);
        drop(reversed);
        assert_eq!(progress.listener_count(), 0);
    }
}
