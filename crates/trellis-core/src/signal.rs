//! Type-safe signals for change notification.
//!
//! Signals are the observer mechanism used throughout Trellis. A widget
//! exposes a [`Signal`] per thing that can happen to it; interested parties
//! connect closures (slots) and are invoked when the signal is emitted.
//!
//! # Invocation model
//!
//! Dispatch is synchronous and runs on the emitting thread: `emit` invokes
//! every connected slot before it returns. Slots run in **connection
//! order** — the order in which `connect` was called — which is what lets
//! a control promise "listener A before listener B" to its users.
//!
//! Slots are invoked with the connection map unlocked, so a slot may
//! connect, disconnect, or call back into the object that owns the signal.
//! Connection changes made during an emission take effect on the next
//! emission, not the current one.
//!
//! # Blocking
//!
//! [`Signal::set_blocked`] temporarily suppresses emission. This is used
//! during internal synchronization where a derived value is pushed into a
//! sub-object whose own notification would be redundant.
//!
//! # Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! let signal = Signal::<String>::new();
//! let id = signal.connect(|s| println!("Got: {}", s));
//! signal.emit("Hello".to_string());
//! signal.disconnect(id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Unique identifier for a signal connection.
    ///
    /// Returned by [`Signal::connect`] and used to disconnect a specific
    /// slot later via [`Signal::disconnect`].
    pub struct ConnectionId;
}

/// Internal storage for a single connection.
struct Connection<Args> {
    /// The slot function to invoke (Arc-wrapped so emission can snapshot it).
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
    /// Position in connection order. Slot reuse in the map can reorder
    /// iteration, so emission sorts by this instead.
    seq: u64,
}

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, all connected slots are invoked synchronously
/// with the provided arguments, in connection order.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for
///   signals with no arguments, or a tuple like `(String, i32)` for
///   multiple arguments.
///
/// # Thread Safety
///
/// `Signal<Args>` is `Send + Sync` and can be stored in shared objects.
/// Emission always happens on the calling thread.
///
/// # Related Types
///
/// - [`ConnectionId`] - Returned by [`connect`](Self::connect), used to disconnect
/// - [`ConnectionGuard`] - RAII-style connection that auto-disconnects on drop
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
    /// Next connection-order sequence number.
    next_seq: AtomicU64,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// The slot will be invoked synchronously on every emission, after all
    /// slots connected before it.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use trellis_core::Signal;
    ///
    /// let signal = Signal::<i32>::new();
    /// signal.connect(|n| println!("first: {}", n));
    /// signal.connect(|n| println!("second: {}", n));
    /// signal.emit(42);
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let connection = Connection {
            slot: Arc::new(slot),
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
        };
        self.connections.lock().insert(connection)
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` will do nothing. This is useful
    /// during initialization or batch updates to prevent cascading
    /// notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    ///
    /// If the signal is blocked, this does nothing. The connection map is
    /// snapshotted before any slot runs, so slots may connect, disconnect,
    /// or re-enter the emitting object; such changes apply to the next
    /// emission.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "trellis_core::signal", "signal blocked, skipping emit");
            return;
        }

        let mut slots: Vec<(u64, Arc<dyn Fn(&Args) + Send + Sync>)> = {
            let connections = self.connections.lock();
            connections
                .iter()
                .map(|(_, conn)| (conn.seq, conn.slot.clone()))
                .collect()
        };
        slots.sort_unstable_by_key(|(seq, _)| *seq);

        tracing::trace!(
            target: "trellis_core::signal",
            connection_count = slots.len(),
            "emitting signal"
        );

        for (_, slot) in slots {
            slot(&args);
        }
    }
}

impl<Args: 'static> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

// SAFETY: The connection map is Mutex-guarded and slots are required to be
// Send + Sync; the remaining fields are atomics.
unsafe impl<Args> Send for Signal<Args> {}
unsafe impl<Args> Sync for Signal<Args> {}

/// A connection guard that automatically disconnects when dropped.
///
/// This is useful for RAII-style connection management, ensuring connections
/// are cleaned up when the receiver goes out of scope. Created via
/// [`Signal::connect_scoped`].
///
/// # Related
///
/// - [`Signal::connect_scoped`] - Creates a `ConnectionGuard`
/// - [`ConnectionId`] - Manual connection management alternative
///
/// # Example
///
/// ```
/// use trellis_core::Signal;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let signal = Signal::<i32>::new();
/// let counter = Arc::new(AtomicI32::new(0));
/// {
///     let counter_clone = counter.clone();
///     let _guard = signal.connect_scoped(move |&n| {
///         counter_clone.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(42);  // counter = 42
/// }
/// signal.emit(43);  // Nothing happens - connection was dropped
/// assert_eq!(counter.load(Ordering::SeqCst), 42);
/// ```
pub struct ConnectionGuard<Args: 'static> {
    signal: *const Signal<Args>,
    id: ConnectionId,
}

impl<Args: 'static> Signal<Args> {
    /// Connect a slot with automatic disconnection when the guard is dropped.
    ///
    /// # Safety
    ///
    /// The returned guard holds a raw pointer to this signal. The signal must
    /// outlive the guard. Using `Arc<Signal<Args>>` is recommended for shared
    /// ownership.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            signal: self as *const Signal<Args>,
            id,
        }
    }
}

impl<Args: 'static> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        // SAFETY: The signal pointer is valid if the guard is used correctly.
        // The caller must ensure the signal outlives the guard.
        unsafe {
            if !self.signal.is_null() {
                let _ = (*self.signal).disconnect(self.id);
            }
        }
    }
}

// SAFETY: ConnectionGuard is Send + Sync because:
// - The raw pointer `signal` is only dereferenced in `drop()`.
// - Signal<Args> itself is Send + Sync (uses Mutex internally for connections).
// - The ConnectionId is a simple Copy type (slotmap key).
// - The guard's safety contract (documented in `connect_scoped`) requires the
//   Signal to outlive the guard, which the caller must ensure.
unsafe impl<Args: 'static> Send for ConnectionGuard<Args> {}
unsafe impl<Args: 'static> Sync for ConnectionGuard<Args> {}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_connect_and_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        signal.emit(2);
        signal.emit(3);

        let values = received.lock();
        assert_eq!(*values, vec![1, 2, 3]);
    }

    #[test]
    fn test_multiple_slots() {
        let signal = Signal::<i32>::new();
        let count = Arc::new(AtomicU32::new(0));

        for _ in 0..3 {
            let count_clone = count.clone();
            signal.connect(move |_| {
                count_clone.fetch_add(1, Ordering::SeqCst);
            });
        }

        signal.emit(0);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_slots_run_in_connection_order() {
        let signal = Signal::<()>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for label in ["external", "widget", "extra"] {
            let order_clone = order.clone();
            signal.connect(move |_| {
                order_clone.lock().push(label);
            });
        }

        signal.emit(());
        assert_eq!(*order.lock(), vec!["external", "widget", "extra"]);
    }

    #[test]
    fn test_order_survives_disconnect_and_reconnect() {
        let signal = Signal::<()>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let order_clone = order.clone();
        let first = signal.connect(move |_| {
            order_clone.lock().push("first");
        });
        let order_clone = order.clone();
        signal.connect(move |_| {
            order_clone.lock().push("second");
        });

        // Freeing the first slot and connecting a new one must not let the
        // newcomer jump ahead of older connections.
        signal.disconnect(first);
        let order_clone = order.clone();
        signal.connect(move |_| {
            order_clone.lock().push("third");
        });

        signal.emit(());
        assert_eq!(*order.lock(), vec!["second", "third"]);
    }

    #[test]
    fn test_disconnect() {
        let signal = Signal::<i32>::new();
        let count = Arc::new(AtomicU32::new(0));

        let count_clone = count.clone();
        let id = signal.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        signal.emit(0);
        assert!(signal.disconnect(id));
        signal.emit(0);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        // Second disconnect of the same id is a no-op
        assert!(!signal.disconnect(id));
    }

    #[test]
    fn test_disconnect_all() {
        let signal = Signal::<()>::new();
        let count = Arc::new(AtomicU32::new(0));

        for _ in 0..4 {
            let count_clone = count.clone();
            signal.connect(move |_| {
                count_clone.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(signal.connection_count(), 4);

        signal.disconnect_all();
        assert_eq!(signal.connection_count(), 0);

        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_blocked_signal_does_not_emit() {
        let signal = Signal::<i32>::new();
        let count = Arc::new(AtomicU32::new(0));

        let count_clone = count.clone();
        signal.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        signal.set_blocked(true);
        assert!(signal.is_blocked());
        signal.emit(1);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        signal.set_blocked(false);
        signal.emit(2);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_debug_reports_connection_count() {
        let signal = Signal::<i32>::new();
        signal.connect(|_| {});

        let rendered = format!("{:?}", signal);
        assert!(rendered.contains("connections: 1"), "got: {rendered}");
        assert!(rendered.contains("blocked: false"), "got: {rendered}");
    }

    #[test]
    fn test_slot_may_disconnect_during_emission() {
        let signal = Arc::new(Signal::<()>::new());
        let count = Arc::new(AtomicU32::new(0));

        let ids: Arc<Mutex<Vec<ConnectionId>>> = Arc::new(Mutex::new(Vec::new()));
        let signal_clone = signal.clone();
        let ids_clone = ids.clone();
        let count_clone = count.clone();
        let id = signal.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
            // Remove ourselves; the snapshot keeps the current round intact.
            for id in ids_clone.lock().drain(..) {
                signal_clone.disconnect(id);
            }
        });
        ids.lock().push(id);

        signal.emit(());
        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_slot_may_connect_during_emission() {
        let signal = Arc::new(Signal::<()>::new());
        let count = Arc::new(AtomicU32::new(0));

        let signal_clone = signal.clone();
        let count_clone = count.clone();
        signal.connect(move |_| {
            let count_inner = count_clone.clone();
            signal_clone.connect(move |_| {
                count_inner.fetch_add(1, Ordering::SeqCst);
            });
        });

        // New connection must not run during the emission that created it.
        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 0);

        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unit_signal() {
        let signal = Signal::<()>::new();
        let fired = Arc::new(AtomicU32::new(0));

        let fired_clone = fired.clone();
        signal.connect(move |_| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        signal.emit(());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_tuple_args() {
        let signal = Signal::<(String, i32)>::new();
        let received = Arc::new(Mutex::new(None));

        let received_clone = received.clone();
        signal.connect(move |args| {
            *received_clone.lock() = Some(args.clone());
        });

        signal.emit(("answer".to_string(), 42));
        assert_eq!(*received.lock(), Some(("answer".to_string(), 42)));
    }

    #[test]
    fn test_connection_guard_disconnects_on_drop() {
        let signal = Signal::<i32>::new();
        let count = Arc::new(AtomicU32::new(0));

        {
            let count_clone = count.clone();
            let _guard = signal.connect_scoped(move |_| {
                count_clone.fetch_add(1, Ordering::SeqCst);
            });
            assert_eq!(signal.connection_count(), 1);
            signal.emit(1);
        }

        assert_eq!(signal.connection_count(), 0);
        signal.emit(2);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_signal_is_send_sync() {
        static_assertions::assert_impl_all!(Signal<i32>: Send, Sync);
        static_assertions::assert_impl_all!(Signal<()>: Send, Sync);
    }
}
