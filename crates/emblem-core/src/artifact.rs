//! Persisted artifact pair
//!
//! An entity durably owns exactly two artifacts; each carries a display
//! name, an optional image reference, two power tags, and one weakness tag.
//! Only these strings are persisted - selection state never touches the
//! artifact records.
//!
//! Stored documents are decoded leniently: any shape mismatch (non-array,
//! wrong arity, wrong field types) yields a fresh default pair instead of an
//! error, and the repaired value is NOT written back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tag::{ArtifactIndex, TagKey, TagSlot};

/// One persisted artifact record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artifact {
    /// Display name of the artifact
    pub name: String,
    /// Image reference, empty when none is attached
    pub image: String,
    /// The two power tag names
    pub powers: [String; 2],
    /// The weakness tag name
    pub weakness: String,
}

impl Artifact {
    /// Read the text of one annotatable slot
    #[must_use]
    pub fn slot(&self, slot: TagSlot) -> &str {
        match slot {
            TagSlot::Power0 => &self.powers[0],
            TagSlot::Power1 => &self.powers[1],
            TagSlot::Weakness => &self.weakness,
        }
    }
}

/// The annotatable/editable fields of one artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactField {
    /// Display name
    Name,
    /// Image reference
    Image,
    /// First power tag
    Power0,
    /// Second power tag
    Power1,
    /// Weakness tag
    Weakness,
}

impl ArtifactField {
    /// The tag key this field backs, if it backs one.
    ///
    /// Name and image are plain fields; clearing them never touches
    /// selections.
    #[must_use]
    pub const fn tag_slot(self) -> Option<TagSlot> {
        match self {
            Self::Power0 => Some(TagSlot::Power0),
            Self::Power1 => Some(TagSlot::Power1),
            Self::Weakness => Some(TagSlot::Weakness),
            Self::Name | Self::Image => None,
        }
    }
}

/// Address of one editable field on the pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldRef {
    /// Which artifact of the pair
    pub artifact: ArtifactIndex,
    /// Which field on that artifact
    pub field: ArtifactField,
}

impl FieldRef {
    /// Create a field reference
    #[must_use]
    pub const fn new(artifact: ArtifactIndex, field: ArtifactField) -> Self {
        Self { artifact, field }
    }

    /// The tag key this field backs, if any
    #[must_use]
    pub const fn tag_key(self) -> Option<TagKey> {
        match self.field.tag_slot() {
            Some(slot) => Some(TagKey::new(self.artifact, slot)),
            None => None,
        }
    }
}

/// The entity's two persisted artifacts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPair([Artifact; 2]);

impl ArtifactPair {
    /// Create a pair from two artifacts
    #[must_use]
    pub const fn new(first: Artifact, second: Artifact) -> Self {
        Self([first, second])
    }

    /// Borrow one artifact of the pair
    #[must_use]
    pub fn artifact(&self, index: ArtifactIndex) -> &Artifact {
        &self.0[index.as_usize()]
    }

    /// Read the text behind a tag key
    #[must_use]
    pub fn tag_name(&self, key: TagKey) -> &str {
        self.artifact(key.artifact).slot(key.slot)
    }

    /// Read the current value of an editable field
    #[must_use]
    pub fn field(&self, field: FieldRef) -> &str {
        let artifact = self.artifact(field.artifact);
        match field.field {
            ArtifactField::Name => &artifact.name,
            ArtifactField::Image => &artifact.image,
            ArtifactField::Power0 => &artifact.powers[0],
            ArtifactField::Power1 => &artifact.powers[1],
            ArtifactField::Weakness => &artifact.weakness,
        }
    }

    /// Overwrite the value of an editable field
    pub fn set_field(&mut self, field: FieldRef, value: impl Into<String>) {
        let artifact = &mut self.0[field.artifact.as_usize()];
        let target = match field.field {
            ArtifactField::Name => &mut artifact.name,
            ArtifactField::Image => &mut artifact.image,
            ArtifactField::Power0 => &mut artifact.powers[0],
            ArtifactField::Power1 => &mut artifact.powers[1],
            ArtifactField::Weakness => &mut artifact.weakness,
        };
        *target = value.into();
    }

    /// Decode a stored document, repairing any shape mismatch to the
    /// default pair. Absent documents decode the same way.
    #[must_use]
    pub fn decode(doc: Option<&Value>) -> Self {
        doc.and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or_default()
    }

    /// Encode the pair for storage.
    ///
    /// Serialization of plain strings and arrays cannot fail; a default
    /// document stands in if it ever does.
    #[must_use]
    pub fn encode(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Array(Vec::new()))
    }
}
