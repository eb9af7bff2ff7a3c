//! Signal/slot system for Horizon Morph.
//!
//! Signals are the observer primitive behind every progress source: when a
//! value changes, the owner emits a signal and every connected slot is called
//! synchronously, on the emitting thread, before `emit` returns. There is no
//! queued delivery; the render pipeline relies on a notification having been
//! fully processed before the next frame phase starts.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal type for emitting notifications
//! - [`ConnectionId`] - Identifier returned when connecting a slot
//!
//! # Example
//!
//! ```
//! use horizon_morph_core::Signal;
//!
//! let value_changed = Signal::<f32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("value is now {value}");
//! });
//!
//! value_changed.emit(0.5);
//! value_changed.disconnect(conn_id);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID remains valid until the connection is explicitly disconnected or
    /// the signal is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, all connected slots are invoked with the provided
/// arguments.
///
/// # Re-entrancy
///
/// The connection table is snapshotted before slots run, so a slot may
/// connect or disconnect (including itself) while the signal is emitting.
/// Changes take effect from the next emission.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
}

impl<Args: Clone + Send + 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: Clone + Send + 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// Returns the number of slots invoked.
    #[tracing::instrument(skip_all, target = "horizon_morph_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) -> usize {
        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in &slots {
            slot(&args);
        }
        slots.len()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_signal_connect_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(42);
        signal.emit(100);

        assert_eq!(*received.lock(), vec![42, 100]);
    }

    #[test]
    fn test_signal_disconnect() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        let conn_id = signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        assert!(signal.disconnect(conn_id));
        assert!(!signal.disconnect(conn_id));
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1]);
    }

    #[test]
    fn test_connection_count() {
        let signal = Signal::<()>::new();
        let ids: Vec<_> = (0..3).map(|_| signal.connect(|_| {})).collect();
        assert_eq!(signal.connection_count(), 3);
        assert_eq!(signal.emit(()), 3);

        signal.disconnect(ids[1]);
        assert_eq!(signal.connection_count(), 2);
        assert_eq!(signal.emit(()), 2);
    }

    #[test]
    fn test_slot_can_disconnect_itself_during_emit() {
        let signal = Arc::new(Signal::<i32>::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let own_id = Arc::new(Mutex::new(None::<ConnectionId>));

        let weak = Arc::downgrade(&signal);
        let calls_clone = calls.clone();
        let own_id_clone = own_id.clone();
        let id = signal.connect(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            if let (Some(signal), Some(id)) = (weak.upgrade(), *own_id_clone.lock()) {
                signal.disconnect(id);
            }
        });
        *own_id.lock() = Some(id);

        assert_eq!(signal.emit(7), 1);
        assert_eq!(signal.emit(8), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
