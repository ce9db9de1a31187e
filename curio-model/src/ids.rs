//! Strongly typed identifiers for collection entities.
//!
//! Ids are small integers assigned by the owning backend (max-plus-one for
//! the volatile backend, SQLite rowid assignment for the durable one), so the
//! wrapped value is an `i64` rather than a UUID.

/// Strongly typed ID for media items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub i64);

impl ItemId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        ItemId(value)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for mediums (physical formats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediumId(pub i64);

impl MediumId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for MediumId {
    fn from(value: i64) -> Self {
        MediumId(value)
    }
}

impl std::fmt::Display for MediumId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
