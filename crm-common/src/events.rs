//! Event bus for CRM services
//!
//! A thin wrapper around `tokio::sync::broadcast` shared by every service.
//! Each service defines its own event enum and instantiates `EventBus<E>`
//! with it; subscribers receive every event emitted after they subscribe.

use tokio::sync::broadcast;

/// Broadcast bus carrying one service's event type.
///
/// Emission never blocks. When no subscriber is listening `emit` returns an
/// error while `emit_lossy` silently drops the event; engine code must not
/// depend on a subscriber existing.
#[derive(Clone)]
pub struct EventBus<E> {
    tx: broadcast::Sender<E>,
    capacity: usize,
}

impl<E: Clone> EventBus<E> {
    /// Creates a new EventBus with the specified channel capacity.
    ///
    /// `capacity` is the number of events buffered per subscriber before the
    /// oldest events are dropped for that subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events.
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers.
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists,
    /// `Err` if no subscriber is listening.
    pub fn emit(&self, event: E) -> Result<usize, broadcast::error::SendError<E>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring the result if no subscribers are listening.
    ///
    /// Use for notifications where it is acceptable that no component is
    /// currently listening.
    pub fn emit_lossy(&self, event: E) {
        let _ = self.tx.send(event);
    }

    /// Number of currently connected subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Configured channel capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
