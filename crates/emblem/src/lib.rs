//! # Emblem
//!
//! Runtime layer for collaborative tag highlighting and single-writer field
//! editing over a shared entity.
//!
//! Players highlight tag slots on an entity's two persisted artifacts; the
//! arbiter merges everyone's highlights into one approval view. The artifact
//! text fields themselves are edited through a commit/cancel state machine
//! that does read-modify-write against a pluggable attribute store.
//!
//! This crate provides the async effects around the pure domain in
//! `emblem-core`:
//! - [`AttributeStore`] / [`BroadcastBus`] collaborator traits
//! - [`FieldStore`] - repair-on-read persistence of the artifact pair
//! - [`SyncProtocol`] - snapshot publishing and arbiter aggregation
//! - [`FieldEditController`] - the inline edit commit/cancel effects
//!
//! ## Error Handling
//!
//! All fallible operations return `Result<T, Error>`. Selection sync is
//! best-effort: transport failures are swallowed (logged at debug) and never
//! interrupt the local action that triggered the publish.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod bus;
pub mod config;
pub mod editor;
pub mod error;
pub mod protocol;
pub mod store;

pub use bus::{BroadcastBus, LocalBus};
pub use config::SyncConfig;
pub use editor::{CommitReceipt, FieldEditController};
pub use error::{Error, Result};
pub use protocol::SyncProtocol;
pub use store::{AttributeStore, FieldStore, FileAttributeStore, MemoryAttributeStore};

pub use emblem_core as core;
