//! Tag slot addressing
//!
//! A tag is one of an artifact's three annotatable fields: two power slots
//! and one weakness slot. A `TagKey` names such a slot independently of the
//! tag's current text, so selections stay stable while names are edited.
//!
//! The wire form is `a{index}.{slot}` with slot one of `p0`, `p1`, `w`
//! (e.g. `a0.p0`, `a1.w`). Parsing is fallible; strings outside this domain
//! are rejected with `Error::InvalidTagKey`.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Which artifact of the pair a key addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactIndex {
    /// First artifact
    First,
    /// Second artifact
    Second,
}

impl ArtifactIndex {
    /// All indexes in presentation order
    pub const ALL: [Self; 2] = [Self::First, Self::Second];

    /// Numeric index into the pair
    #[must_use]
    pub const fn as_usize(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// Build from a numeric index
    #[must_use]
    pub const fn from_usize(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::First),
            1 => Some(Self::Second),
            _ => None,
        }
    }
}

/// One of the three annotatable slots on an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagSlot {
    /// First power slot, contributes +1 when approved
    Power0,
    /// Second power slot, contributes +1 when approved
    Power1,
    /// Weakness slot, contributes -1 when approved
    Weakness,
}

impl TagSlot {
    /// All slots in presentation order
    pub const ALL: [Self; 3] = [Self::Power0, Self::Power1, Self::Weakness];

    /// Wire suffix for this slot
    #[must_use]
    pub const fn wire_suffix(self) -> &'static str {
        match self {
            Self::Power0 => "p0",
            Self::Power1 => "p1",
            Self::Weakness => "w",
        }
    }

    /// Approval modifier contributed by this slot
    #[must_use]
    pub const fn modifier(self) -> i32 {
        match self {
            Self::Power0 | Self::Power1 => 1,
            Self::Weakness => -1,
        }
    }
}

/// Stable address of one annotatable slot on an entity's artifact pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagKey {
    /// Which artifact of the pair
    pub artifact: ArtifactIndex,
    /// Which slot on that artifact
    pub slot: TagSlot,
}

impl TagKey {
    /// Create a key for a slot on an artifact
    #[must_use]
    pub const fn new(artifact: ArtifactIndex, slot: TagSlot) -> Self {
        Self { artifact, slot }
    }

    /// All six keys in presentation order: artifact 0 before artifact 1,
    /// within an artifact power 0, power 1, weakness.
    #[must_use]
    pub fn all() -> impl Iterator<Item = Self> {
        ArtifactIndex::ALL
            .into_iter()
            .flat_map(|artifact| TagSlot::ALL.into_iter().map(move |slot| Self::new(artifact, slot)))
    }
}

impl std::fmt::Display for TagKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "a{}.{}", self.artifact.as_usize(), self.slot.wire_suffix())
    }
}

impl FromStr for TagKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let rejected = || Error::InvalidTagKey(s.to_string());

        let (artifact_part, slot_part) = s.split_once('.').ok_or_else(rejected)?;
        let index = artifact_part
            .strip_prefix('a')
            .and_then(|digits| digits.parse::<usize>().ok())
            .and_then(ArtifactIndex::from_usize)
            .ok_or_else(rejected)?;
        let slot = match slot_part {
            "p0" => TagSlot::Power0,
            "p1" => TagSlot::Power1,
            "w" => TagSlot::Weakness,
            _ => return Err(rejected()),
        };
        Ok(Self::new(index, slot))
    }
}

impl Serialize for TagKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TagKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
