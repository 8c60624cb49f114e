//! Inline field edit controller
//!
//! Wraps the pure [`EditSession`] state machine with the async effects of a
//! commit: read the current persisted pair, mutate only the targeted field,
//! write the pair back whole. Re-reading per commit means concurrent edits
//! to unrelated fields never clobber each other; same-field races across
//! clients resolve to the later write.
//!
//! Edit capability is an explicit flag pushed in by the host via
//! [`FieldEditController::set_editable`], not inferred from surrounding UI
//! state.

use std::sync::Arc;

use emblem_core::{EditOutcome, EditSession, EntityId, FieldRef};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::protocol::SyncProtocol;
use crate::store::FieldStore;

/// What a resolved commit did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitReceipt {
    /// The trimmed value that was persisted
    pub value: String,
    /// Whether the commit emptied a tag and cleared its selection key
    pub cleared_selection: bool,
}

/// Edit controller for one field on one entity
pub struct FieldEditController {
    entity: EntityId,
    field: FieldRef,
    fields: FieldStore,
    sync: Arc<SyncProtocol>,
    session: EditSession,
    editable: bool,
    display: String,
}

impl FieldEditController {
    /// Open a controller, reading the field's current persisted value.
    ///
    /// Controllers start non-editable; the host grants capability via
    /// [`Self::set_editable`].
    pub async fn open(
        entity: EntityId,
        field: FieldRef,
        fields: FieldStore,
        sync: Arc<SyncProtocol>,
    ) -> Result<Self> {
        let pair = fields.read(&entity).await?;
        let display = pair.field(field).to_string();
        Ok(Self {
            entity,
            field,
            fields,
            sync,
            session: EditSession::new(),
            editable: false,
            display,
        })
    }

    /// The value the surface currently shows
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// True while the surface accepts input
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.session.is_editing()
    }

    /// Whether the surface should render at all: an empty field is hidden
    /// in `Idle` but shown (empty) while editing.
    #[must_use]
    pub fn surface_visible(&self) -> bool {
        self.is_editing() || !self.display.trim().is_empty()
    }

    /// Host-pushed edit capability for this surface
    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    /// Start editing, capturing the displayed value for rollback
    pub fn begin_edit(&mut self) -> Result<()> {
        if !self.editable {
            return Err(Error::NotEditable);
        }
        self.session.begin(self.display.clone())?;
        Ok(())
    }

    /// Commit the edit: trim, read-modify-write the persisted pair, and if
    /// the field emptied, unselect its tag key and republish.
    ///
    /// Returns `None` when no session was open (double commit, commit after
    /// cancel). A write failure surfaces once; the local display stays
    /// optimistically committed.
    pub async fn commit(&mut self, input: &str) -> Result<Option<CommitReceipt>> {
        let EditOutcome::Resolved(trimmed) = self.session.begin_commit(input) else {
            return Ok(None);
        };

        // Read the current persisted pair, not a cached one, so concurrent
        // commits to other fields are preserved.
        let write_result = match self.fields.read(&self.entity).await {
            Ok(mut pair) => {
                pair.set_field(self.field, trimmed.clone());
                self.fields.write(&self.entity, &pair).await
            }
            Err(err) => Err(err),
        };

        self.session.finish_commit();
        self.display = trimmed.clone();
        write_result?;

        let cleared_selection = if trimmed.is_empty() {
            match self.field.tag_key() {
                Some(key) => self.sync.unselect(&self.entity, key).await,
                None => false,
            }
        } else {
            false
        };

        Ok(Some(CommitReceipt {
            value: trimmed,
            cleared_selection,
        }))
    }

    /// Loss of focus commits whatever the surface holds
    pub async fn blur(&mut self, input: &str) -> Result<Option<CommitReceipt>> {
        self.commit(input).await
    }

    /// Cancel the edit: no write, display reverts to the true persisted
    /// value (re-read, since another commit could have landed meanwhile).
    ///
    /// Returns whether a session was actually open.
    pub async fn cancel(&mut self) -> bool {
        let EditOutcome::Resolved(original) = self.session.cancel() else {
            return false;
        };
        self.display = match self.fields.read(&self.entity).await {
            Ok(pair) => pair.field(self.field).to_string(),
            Err(err) => {
                debug!(error = %err, "cancel re-read failed, reverting to captured value");
                original
            }
        };
        true
    }
}
