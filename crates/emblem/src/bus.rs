//! Broadcast channel boundary
//!
//! The transport the host hands us is unordered, at-most-once fan-out:
//! messages may be dropped, there is no acknowledgment and no retry, and no
//! ordering is guaranteed between clients. The protocol tolerates all of
//! this because snapshots are full replacements.
//!
//! [`LocalBus`] is the process-local implementation used by tests and
//! single-process hosts; real hosts adapt their own transport behind
//! [`BroadcastBus`].

use emblem_core::SelectionMessage;
use tokio::sync::broadcast;

use crate::error::Result;

/// Publish side of the host's fan-out transport
#[async_trait::async_trait]
pub trait BroadcastBus: Send + Sync {
    /// Publish one snapshot message to every subscriber.
    ///
    /// Implementations are at-most-once: an error means the message may not
    /// have left this process, nothing more.
    async fn publish(&self, message: &SelectionMessage) -> Result<()>;
}

/// Process-local fan-out bus over a tokio broadcast channel
#[derive(Debug)]
pub struct LocalBus {
    sender: broadcast::Sender<SelectionMessage>,
}

impl LocalBus {
    /// Create a bus buffering up to `capacity` undelivered messages per
    /// subscriber; older messages are dropped beyond that (at-most-once).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to every message published after this call
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SelectionMessage> {
        self.sender.subscribe()
    }
}

impl Default for LocalBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait::async_trait]
impl BroadcastBus for LocalBus {
    async fn publish(&self, message: &SelectionMessage) -> Result<()> {
        // A bus with no subscribers is not a delivery failure.
        let _ = self.sender.send(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use emblem_core::{ClientId, EntityId, SelectionSet};

    use super::*;

    #[tokio::test]
    async fn publish_reaches_subscribers() {
        let bus = LocalBus::default();
        let mut receiver = bus.subscribe();

        let message = SelectionMessage::snapshot(
            EntityId::new("e1"),
            ClientId::new("x"),
            &SelectionSet::new(),
        );
        bus.publish(&message).await.unwrap();

        assert_eq!(receiver.recv().await.unwrap(), message);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_ok() {
        let bus = LocalBus::new(8);
        let message = SelectionMessage::snapshot(
            EntityId::new("e1"),
            ClientId::new("x"),
            &SelectionSet::new(),
        );
        assert!(bus.publish(&message).await.is_ok());
    }
}
