//! Collection entities: items and the mediums they are stored on.

use crate::ids::{ItemId, MediumId};
use crate::taxonomy::{ItemType, LocationType};

/// The medium an item in the collection is stored on (e.g. hardcover,
/// paperback, DVD).
///
/// The medium catalog is seeded once at backend initialization and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Medium {
    pub id: MediumId,
    pub name: String,
    /// The item category this medium is valid for.
    pub media_type: ItemType,
}

impl Medium {
    pub fn new(id: impl Into<MediumId>, name: impl Into<String>, media_type: ItemType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            media_type,
        }
    }
}

/// A single entry in the media collection.
///
/// Every persisted item references an existing [`Medium`]; the foreign key
/// stored by the durable backend is always derived from `medium.id`, never
/// carried separately.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaItem {
    /// Assigned by the backend on add; ignored on input.
    pub id: ItemId,
    pub name: String,
    pub media_type: ItemType,
    /// Physical disposition, if known.
    pub location: Option<LocationType>,
    /// The physical format this item is stored on.
    pub medium: Medium,
}

impl MediaItem {
    /// The foreign key value for the referenced medium.
    pub fn medium_id(&self) -> MediumId {
        self.medium.id
    }

    /// Copy of this item with a different id, as assigned by a backend.
    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = id.into();
        self
    }
}
