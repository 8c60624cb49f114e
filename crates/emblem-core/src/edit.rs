//! Inline field edit state machine (pure transitions)
//!
//! One session guards one editable field. The session is deliberately
//! decoupled from any rendering surface: it owns only the state and the
//! pre-edit value captured for rollback, so the machine is testable without
//! a UI. The async read-modify-write effect around a commit lives in the
//! `emblem` runtime crate.
//!
//! Exactly one of commit or cancel resolves a session; both are idempotent
//! terminal actions - a second firing is a no-op, guarded by the state no
//! longer being `Editing`.

use crate::error::{Error, Result};

/// State of one field's edit session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    /// No edit in progress
    Idle,
    /// Surface is live; the pre-edit value is held for rollback
    Editing {
        /// Field value captured when the edit began
        original_value: String,
    },
    /// A commit's persisted write is in flight
    Committing,
}

/// Result of a terminal action (commit or cancel) on a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The action resolved the open session, carrying its value:
    /// the trimmed input for a commit, the captured original for a cancel
    Resolved(String),
    /// No session was open; the action was a no-op
    NoOp,
}

impl EditOutcome {
    /// True when the action actually resolved a session
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Edit session for a single field
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    state: EditState,
}

impl Default for EditState {
    fn default() -> Self {
        Self::Idle
    }
}

impl EditSession {
    /// Create an idle session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the current state
    #[must_use]
    pub const fn state(&self) -> &EditState {
        &self.state
    }

    /// True while the surface accepts input
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    /// Start an edit, capturing the field's current value for rollback.
    ///
    /// Only legal from `Idle`; an open session must resolve first.
    pub fn begin(&mut self, current_value: impl Into<String>) -> Result<()> {
        match self.state {
            EditState::Idle => {
                self.state = EditState::Editing {
                    original_value: current_value.into(),
                };
                Ok(())
            }
            EditState::Editing { .. } => Err(Error::InvalidEditTransition(
                "begin while a session is already editing".to_string(),
            )),
            EditState::Committing => Err(Error::InvalidEditTransition(
                "begin while a commit is in flight".to_string(),
            )),
        }
    }

    /// Move into `Committing`, yielding the trimmed input to persist.
    ///
    /// A no-op unless the session is `Editing` - this is the idempotence
    /// guard for double commits and commit-after-cancel.
    pub fn begin_commit(&mut self, input: &str) -> EditOutcome {
        if !self.is_editing() {
            return EditOutcome::NoOp;
        }
        self.state = EditState::Committing;
        EditOutcome::Resolved(input.trim().to_string())
    }

    /// Finish the in-flight commit, returning to `Idle`.
    ///
    /// Called on write success and on write failure alike: local state stays
    /// optimistically committed, the failure surfaces to the caller once.
    pub fn finish_commit(&mut self) {
        if matches!(self.state, EditState::Committing) {
            self.state = EditState::Idle;
        }
    }

    /// Cancel the open edit, yielding the captured original value.
    ///
    /// A no-op unless the session is `Editing`.
    pub fn cancel(&mut self) -> EditOutcome {
        match std::mem::take(&mut self.state) {
            EditState::Editing { original_value } => EditOutcome::Resolved(original_value),
            other => {
                self.state = other;
                EditOutcome::NoOp
            }
        }
    }
}
