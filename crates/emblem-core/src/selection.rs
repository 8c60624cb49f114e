//! Per-client selection store
//!
//! Holds each client's ephemeral highlighted-tag sets, keyed by client then
//! entity. Selections never persist and are never written on behalf of
//! another client; the store is purely local state that the sync protocol
//! snapshots onto the wire.

use std::collections::{BTreeMap, BTreeSet};

use crate::identity::{ClientId, EntityId};
use crate::tag::TagKey;

/// A set of highlighted tag keys for one (client, entity) pair
pub type SelectionSet = BTreeSet<TagKey>;

/// In-memory highlighted-tag sets, one per (client, entity)
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    sets: BTreeMap<ClientId, BTreeMap<EntityId, SelectionSet>>,
}

impl SelectionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one key's highlight state and return the new state.
    ///
    /// Unknown (client, entity) pairs are created lazily; toggling twice
    /// restores the original state.
    pub fn toggle(&mut self, client: &ClientId, entity: &EntityId, key: TagKey) -> bool {
        let set = self
            .sets
            .entry(client.clone())
            .or_default()
            .entry(entity.clone())
            .or_default();
        if set.remove(&key) {
            false
        } else {
            set.insert(key);
            true
        }
    }

    /// Remove one key if present; returns whether it was present
    pub fn remove(&mut self, client: &ClientId, entity: &EntityId, key: TagKey) -> bool {
        self.sets
            .get_mut(client)
            .and_then(|entities| entities.get_mut(entity))
            .is_some_and(|set| set.remove(&key))
    }

    /// Snapshot the current set for a (client, entity) pair.
    ///
    /// Unknown pairs yield an empty set, never an error.
    #[must_use]
    pub fn get_all(&self, client: &ClientId, entity: &EntityId) -> SelectionSet {
        self.sets
            .get(client)
            .and_then(|entities| entities.get(entity))
            .cloned()
            .unwrap_or_default()
    }

    /// Drop every key for a (client, entity) pair
    pub fn clear(&mut self, client: &ClientId, entity: &EntityId) {
        if let Some(entities) = self.sets.get_mut(client) {
            entities.remove(entity);
        }
    }
}
