//! Broadcast channel for entity changes.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. Every entity
//! write publishes an [`EntityChange`] through the bus, and all WebSocket
//! connections subscribe to receive filtered changes.

use tokio::sync::broadcast;

use super::EntityChange;

/// Broadcast bus for [`EntityChange`]s.
///
/// Backed by a `tokio::broadcast` channel with a configurable capacity
/// (default 10 000). When the ring buffer is full, the oldest changes are
/// dropped for lagging receivers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EntityChange>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes a change to all subscribers.
    ///
    /// Returns the number of receivers that received the change.
    /// If there are no active receivers, the change is silently dropped.
    pub fn publish(&self, change: EntityChange) -> usize {
        self.sender.send(change).unwrap_or(0)
    }

    /// Creates a new receiver that will receive all future changes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<EntityChange> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
