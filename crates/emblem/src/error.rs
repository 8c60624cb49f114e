//! Error types for the emblem runtime

use thiserror::Error;

/// Runtime error type for emblem operations
#[derive(Debug, Error)]
pub enum Error {
    /// Reading an entity's attribute document failed
    #[error("Read failed for entity '{entity}': {reason}")]
    ReadFailed {
        /// Entity whose document was read
        entity: String,
        /// Underlying failure
        reason: String,
    },

    /// Persisting an entity's attribute document failed.
    ///
    /// Surfaced once to the initiating caller; no retry, no rollback.
    #[error("Write failed for entity '{entity}': {reason}")]
    WriteFailed {
        /// Entity whose document was written
        entity: String,
        /// Underlying failure
        reason: String,
    },

    /// Publishing on the broadcast channel failed.
    ///
    /// Selection sync swallows this; it only escapes through collaborator
    /// traits used directly.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The host has not granted edit capability to this surface
    #[error("Editing is disabled for this surface")]
    NotEditable,

    /// Domain-level error from emblem-core
    #[error(transparent)]
    Domain(#[from] emblem_core::Error),
}

/// Result type alias for emblem runtime operations
pub type Result<T> = std::result::Result<T, Error>;
