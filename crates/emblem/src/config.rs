//! Sync configuration
//!
//! Constructed by the host at startup; there is no config file. Arbiter
//! privilege is a plain capability flag pushed in by the host - the library
//! performs no authentication beyond it.

use emblem_core::ClientId;

/// Per-process configuration for the sync protocol
#[derive(Debug, Clone)]
pub struct SyncConfig {
    client_id: ClientId,
    arbiter: bool,
}

impl SyncConfig {
    /// Create a config for a regular (non-arbiter) client
    #[must_use]
    pub fn new(client_id: impl Into<ClientId>) -> Self {
        Self {
            client_id: client_id.into(),
            arbiter: false,
        }
    }

    /// Grant this client the arbiter privilege
    #[must_use]
    pub const fn with_arbiter(mut self) -> Self {
        self.arbiter = true;
        self
    }

    /// The local client's identity
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Whether this client may aggregate other clients' selections
    #[must_use]
    pub const fn is_arbiter(&self) -> bool {
        self.arbiter
    }
}

impl From<ClientId> for SyncConfig {
    fn from(client_id: ClientId) -> Self {
        Self::new(client_id)
    }
}
