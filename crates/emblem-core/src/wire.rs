//! Broadcast wire format
//!
//! One message kind crosses the process-local broadcast channel: a full
//! selection snapshot for one (entity, client) pair. Snapshots always carry
//! the whole set, never a delta, so the receiver's only obligation is to
//! replace its previous row.
//!
//! Wire shape (round-trips exactly):
//! `{ "t": "selection", "entityId": "...", "clientId": "...", "keys": ["a0.p0", ...] }`
//!
//! Messages missing `entityId` or `clientId` decode to
//! `Error::MalformedMessage` and are expected to be discarded without
//! effect. Key strings outside the tag-key domain survive decoding and are
//! dropped only when the snapshot is converted to a selection set.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::identity::{ClientId, EntityId};
use crate::selection::SelectionSet;
use crate::tag::TagKey;

/// Message kind discriminator for selection snapshots
pub const SELECTION_KIND: &str = "selection";

/// A full selection snapshot for one (entity, client) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionMessage {
    /// Message kind, always `"selection"`
    pub t: String,
    /// Entity the snapshot belongs to
    #[serde(rename = "entityId")]
    pub entity_id: EntityId,
    /// Client that owns the snapshot
    #[serde(rename = "clientId")]
    pub client_id: ClientId,
    /// Tag keys in wire text form
    pub keys: Vec<String>,
}

impl SelectionMessage {
    /// Build a snapshot message from a client's current selection set
    #[must_use]
    pub fn snapshot(entity: EntityId, client: ClientId, keys: &SelectionSet) -> Self {
        Self {
            t: SELECTION_KIND.to_string(),
            entity_id: entity,
            client_id: client,
            keys: keys.iter().map(ToString::to_string).collect(),
        }
    }

    /// Decode a raw payload, rejecting anything that is not a well-formed
    /// selection message.
    pub fn decode(payload: &serde_json::Value) -> Result<Self> {
        let message: Self = serde_json::from_value(payload.clone())
            .map_err(|err| Error::MalformedMessage(err.to_string()))?;
        if message.t != SELECTION_KIND {
            return Err(Error::MalformedMessage(format!(
                "unknown message kind '{}'",
                message.t
            )));
        }
        if message.entity_id.is_empty() || message.client_id.is_empty() {
            return Err(Error::MalformedMessage(
                "missing entityId or clientId".to_string(),
            ));
        }
        Ok(message)
    }

    /// Encode for the wire
    #[must_use]
    pub fn encode(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Parse the carried keys into a selection set.
    ///
    /// Out-of-domain key strings are dropped here, not rejected at
    /// ingestion - forward compatibility over strictness.
    #[must_use]
    pub fn selection_set(&self) -> SelectionSet {
        self.keys
            .iter()
            .filter_map(|text| text.parse::<TagKey>().ok())
            .collect()
    }
}
