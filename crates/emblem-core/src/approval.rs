//! Approval view builder
//!
//! Folds the persisted artifact pair and a selection view (local or merged)
//! into the ordered list of entries presented at approval time. Selection
//! state and field state are independently sourced, so they are reconciled
//! here at read time: a selected key whose field is now empty contributes
//! nothing.

use crate::artifact::ArtifactPair;
use crate::selection::SelectionSet;
use crate::tag::TagKey;

/// One line of the approval view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalEntry {
    /// Key the entry was built from
    pub key: TagKey,
    /// Trimmed tag text at build time
    pub label: String,
    /// +1 for powers, -1 for the weakness
    pub modifier: i32,
    /// Per-entry accept/reject toggle; every entry starts accepted
    pub accepted: bool,
}

/// The entries presented for one approval decision
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovalView {
    entries: Vec<ApprovalEntry>,
}

impl ApprovalView {
    /// Borrow the entries in presentation order
    #[must_use]
    pub fn entries(&self) -> &[ApprovalEntry] {
        &self.entries
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was selected (or everything selected was empty)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flip one entry's accept toggle; out-of-range indexes are ignored
    pub fn set_accepted(&mut self, index: usize, accepted: bool) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.accepted = accepted;
        }
    }

    /// Net modifier over the currently accepted entries
    #[must_use]
    pub fn total_modifier(&self) -> i32 {
        self.entries
            .iter()
            .filter(|entry| entry.accepted)
            .map(|entry| entry.modifier)
            .sum()
    }
}

/// Build the approval view for a pair and a selection.
///
/// An entry appears iff its key is selected AND the field's trimmed text is
/// non-empty. Order is deterministic: artifact 0 before artifact 1; within
/// an artifact power 0, power 1, weakness.
#[must_use]
pub fn build_view(pair: &ArtifactPair, selection: &SelectionSet) -> ApprovalView {
    let entries = TagKey::all()
        .filter(|key| selection.contains(key))
        .filter_map(|key| {
            let label = pair.tag_name(key).trim();
            if label.is_empty() {
                return None;
            }
            Some(ApprovalEntry {
                key,
                label: label.to_string(),
                modifier: key.slot.modifier(),
                accepted: true,
            })
        })
        .collect();
    ApprovalView { entries }
}
