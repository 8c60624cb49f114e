//! Arbiter snapshot inbox
//!
//! The arbiter keeps the latest selection snapshot received from each client
//! per entity. Rows are replaced whole - last write wins per client, with no
//! sequence numbers or staleness detection (the transport is explicitly
//! best-effort). The merged view is a set union, so row iteration order
//! cannot affect the result.

use std::collections::BTreeMap;

use crate::identity::{ClientId, EntityId};
use crate::selection::SelectionSet;

/// Latest per-client selection snapshots, held only by the arbiter
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    rows: BTreeMap<EntityId, BTreeMap<ClientId, SelectionSet>>,
}

impl Inbox {
    /// Create an empty inbox
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one client's row for an entity with a fresh snapshot.
    ///
    /// The previous row is discarded, not merged.
    pub fn record_snapshot(&mut self, entity: &EntityId, client: &ClientId, keys: SelectionSet) {
        self.rows
            .entry(entity.clone())
            .or_default()
            .insert(client.clone(), keys);
    }

    /// Union of all clients' current snapshots for an entity.
    ///
    /// Empty when no rows exist yet.
    #[must_use]
    pub fn merged_view(&self, entity: &EntityId) -> SelectionSet {
        self.rows
            .get(entity)
            .map(|clients| clients.values().flatten().copied().collect())
            .unwrap_or_default()
    }

    /// Number of clients with a recorded row for an entity
    #[must_use]
    pub fn client_count(&self, entity: &EntityId) -> usize {
        self.rows.get(entity).map_or(0, BTreeMap::len)
    }

    /// Drop every row for an entity (after an approval is finalized)
    pub fn clear_entity(&mut self, entity: &EntityId) {
        self.rows.remove(entity);
    }
}
