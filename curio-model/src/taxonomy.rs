use std::fmt::Display;
use std::fmt::Formatter;

use crate::error::ModelError;

/// Top-level category of a collection item.
///
/// Doubles as the classification on [`crate::Medium`] and as the filter key
/// for medium queries. Stored as its integer discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemType {
    /// Printed or bound works
    Book = 0,
    /// Audio recordings
    Music = 1,
    /// Film and television
    Video = 2,
}

impl ItemType {
    /// Every item type, in declaration order.
    pub const ALL: [ItemType; 3] = [ItemType::Book, ItemType::Music, ItemType::Video];
}

impl Display for ItemType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemType::Book => write!(f, "Book"),
            ItemType::Music => write!(f, "Music"),
            ItemType::Video => write!(f, "Video"),
        }
    }
}

impl TryFrom<i64> for ItemType {
    type Error = ModelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ItemType::Book),
            1 => Ok(ItemType::Music),
            2 => Ok(ItemType::Video),
            other => Err(ModelError::InvalidItemType(other)),
        }
    }
}

/// Physical disposition of a collection item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationType {
    /// In the owner's possession
    InCollection = 0,
    /// Loaned out
    Loaned = 1,
}

impl LocationType {
    /// Every location type, in declaration order.
    pub const ALL: [LocationType; 2] = [LocationType::InCollection, LocationType::Loaned];
}

impl Display for LocationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationType::InCollection => write!(f, "In Collection"),
            LocationType::Loaned => write!(f, "Loaned"),
        }
    }
}

impl TryFrom<i64> for LocationType {
    type Error = ModelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LocationType::InCollection),
            1 => Ok(LocationType::Loaned),
            other => Err(ModelError::InvalidLocationType(other)),
        }
    }
}
