//! Emblem-core - Domain types and pure logic for collaborative tag approval
//!
//! This crate provides:
//! - Entity/client identity types and tag slot addressing
//! - The per-client selection store and the arbiter's snapshot inbox
//! - The persisted artifact pair with repair-on-read decoding
//! - The inline field edit state machine (pure transitions)
//! - The approval view builder
//! - The broadcast wire format
//!
//! Nothing in this crate performs I/O; async effects live in the `emblem`
//! runtime crate.

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

pub mod approval;
pub mod artifact;
pub mod edit;
pub mod error;
pub mod identity;
pub mod inbox;
pub mod selection;
pub mod tag;
pub mod wire;

pub use approval::{ApprovalEntry, ApprovalView, build_view};
pub use artifact::{Artifact, ArtifactField, ArtifactPair, FieldRef};
pub use edit::{EditOutcome, EditSession, EditState};
pub use error::{Error, Result};
pub use identity::{ClientId, EntityId};
pub use inbox::Inbox;
pub use selection::{SelectionSet, SelectionStore};
pub use tag::{ArtifactIndex, TagKey, TagSlot};
pub use wire::SelectionMessage;
