//! Selection synchronization protocol
//!
//! Every client (the arbiter included) publishes its full selection set for
//! an entity whenever it changes, and once proactively after initial load.
//! Full snapshots, never deltas: the receiver's only obligation is to
//! replace that client's row, so dropped or reordered messages cost nothing
//! but freshness. Only the arbiter aggregates received snapshots; everyone
//! else ignores them.
//!
//! Publishing is best-effort. A transport failure is logged and swallowed -
//! it must never interrupt the local toggle that triggered it.

use std::sync::Arc;

use emblem_core::{ClientId, EntityId, Inbox, SelectionMessage, SelectionSet, SelectionStore, TagKey};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::bus::BroadcastBus;
use crate::config::SyncConfig;

/// Snapshot publishing and arbiter-side aggregation for one client process
pub struct SyncProtocol {
    config: SyncConfig,
    bus: Arc<dyn BroadcastBus>,
    selections: Mutex<SelectionStore>,
    inbox: Mutex<Inbox>,
}

impl SyncProtocol {
    /// Create the protocol for this process
    #[must_use]
    pub fn new(config: SyncConfig, bus: Arc<dyn BroadcastBus>) -> Self {
        Self {
            config,
            bus,
            selections: Mutex::new(SelectionStore::new()),
            inbox: Mutex::new(Inbox::new()),
        }
    }

    /// The local client's identity
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        self.config.client_id()
    }

    /// Whether this process aggregates other clients' snapshots
    #[must_use]
    pub const fn is_arbiter(&self) -> bool {
        self.config.is_arbiter()
    }

    /// Flip one key's local highlight state and broadcast the new snapshot.
    ///
    /// Returns the key's new active state. The broadcast is best-effort and
    /// cannot fail the toggle.
    pub async fn toggle(&self, entity: &EntityId, key: TagKey) -> bool {
        let (active, snapshot) = {
            let mut selections = self.selections.lock().await;
            let active = selections.toggle(self.client_id(), entity, key);
            (active, selections.get_all(self.client_id(), entity))
        };
        self.publish_snapshot(entity, snapshot).await;
        active
    }

    /// Broadcast the current snapshot for an entity (the one proactive
    /// publish after initial load).
    pub async fn announce(&self, entity: &EntityId) {
        let snapshot = self.local_view(entity).await;
        self.publish_snapshot(entity, snapshot).await;
    }

    /// The local client's current selection for an entity
    pub async fn local_view(&self, entity: &EntityId) -> SelectionSet {
        self.selections.lock().await.get_all(self.client_id(), entity)
    }

    /// Drop one key from the local selection if present, republishing when
    /// it was. Used when a field commit empties a tag: an empty tag cannot
    /// stay selected.
    pub async fn unselect(&self, entity: &EntityId, key: TagKey) -> bool {
        let (removed, snapshot) = {
            let mut selections = self.selections.lock().await;
            let removed = selections.remove(self.client_id(), entity, key);
            (removed, selections.get_all(self.client_id(), entity))
        };
        if removed {
            self.publish_snapshot(entity, snapshot).await;
        }
        removed
    }

    /// Ingest one raw broadcast payload.
    ///
    /// Malformed messages are discarded silently (logged at debug, never
    /// propagated). Non-arbiters ignore well-formed snapshots too - the
    /// inbox exists only on the arbiter.
    pub async fn handle_message(&self, payload: &Value) {
        let message = match SelectionMessage::decode(payload) {
            Ok(message) => message,
            Err(err) => {
                debug!(error = %err, "discarding malformed selection message");
                return;
            }
        };
        if !self.is_arbiter() {
            return;
        }
        self.inbox.lock().await.record_snapshot(
            &message.entity_id,
            &message.client_id,
            message.selection_set(),
        );
    }

    /// Union of all clients' latest snapshots for an entity.
    ///
    /// Empty until snapshots arrive; always empty on non-arbiters.
    pub async fn merged_view(&self, entity: &EntityId) -> SelectionSet {
        self.inbox.lock().await.merged_view(entity)
    }

    /// Clear all selection state for an entity once its approval is
    /// finalized: the local set is emptied and republished, and the
    /// arbiter's inbox rows are dropped.
    pub async fn clear_after_approval(&self, entity: &EntityId) {
        {
            let mut selections = self.selections.lock().await;
            selections.clear(self.client_id(), entity);
        }
        self.publish_snapshot(entity, SelectionSet::new()).await;
        if self.is_arbiter() {
            self.inbox.lock().await.clear_entity(entity);
        }
        info!(entity = %entity, "cleared selections after approval");
    }

    async fn publish_snapshot(&self, entity: &EntityId, snapshot: SelectionSet) {
        let message =
            SelectionMessage::snapshot(entity.clone(), self.client_id().clone(), &snapshot);
        // The arbiter is a client too; record its own snapshot directly so
        // aggregation does not depend on the bus echoing to self.
        if self.is_arbiter() {
            self.inbox.lock().await.record_snapshot(
                entity,
                self.client_id(),
                message.selection_set(),
            );
        }
        if let Err(err) = self.bus.publish(&message).await {
            debug!(error = %err, entity = %entity, "dropping selection snapshot publish");
        }
    }
}
