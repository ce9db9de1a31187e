use async_trait::async_trait;

use curio_model::{ItemId, ItemType, LocationType, MediaItem, Medium};

use crate::error::Result;

/// Port for the media-collection working set and its medium catalog.
///
/// Implementations live in infra adapters (SQLite, in-memory) and must not
/// leak storage types into callers. Both backends are observably identical
/// behind this trait, including id assignment.
///
/// The service is safe for single-caller use only: each durable operation
/// acquires its own connection, so overlapping writes against the same row
/// are not serialized by this layer. Wrap the service in an external lock if
/// it is ever shared between concurrent writers.
///
/// [`DataService::initialize`] must be called once before any other
/// operation; everything else fails with
/// [`CollectionError::Uninitialized`](crate::CollectionError::Uninitialized)
/// until then.
#[async_trait]
pub trait DataService: Send + Sync {
    /// Idempotent setup: create storage if missing, seed the medium catalog
    /// if empty, and clear the selection cursor.
    async fn initialize(&self) -> Result<()>;

    /// The full working set, in insertion order.
    async fn items(&self) -> Result<Vec<MediaItem>>;

    /// Exact-id lookup.
    async fn item(&self, id: ItemId) -> Result<Option<MediaItem>>;

    /// Store a new item and return its assigned id.
    ///
    /// The caller's `item.id` is ignored; the backend assigns one greater
    /// than the current maximum id, or 1 when the collection is empty. The
    /// item's medium must name an existing catalog entry, else
    /// `Validation`.
    async fn add_item(&self, item: MediaItem) -> Result<ItemId>;

    /// Replace the stored record matching `item.id` in place, preserving its
    /// position in iteration order. Fails with `NotFound` if no such record
    /// exists.
    async fn update_item(&self, item: MediaItem) -> Result<()>;

    /// Remove the record matching `item.id`. Deleting a non-existent id is a
    /// no-op, so a double delete succeeds.
    async fn delete_item(&self, item: &MediaItem) -> Result<()>;

    /// The fixed item-type taxonomy, in declaration order.
    fn item_types(&self) -> Vec<ItemType> {
        ItemType::ALL.to_vec()
    }

    /// The fixed location-type taxonomy, in declaration order.
    fn location_types(&self) -> Vec<LocationType> {
        LocationType::ALL.to_vec()
    }

    /// First medium with the given name, if any.
    async fn medium(&self, name: &str) -> Result<Option<Medium>>;

    /// The full medium catalog.
    async fn mediums(&self) -> Result<Vec<Medium>>;

    /// The mediums valid for the given item type.
    async fn mediums_for(&self, item_type: ItemType) -> Result<Vec<Medium>>;

    /// Transient, process-local cursor for the currently selected item. Not
    /// persisted, not validated against the working set.
    fn selected_item(&self) -> Option<ItemId>;

    /// Set or clear the selection cursor.
    fn set_selected_item(&self, id: Option<ItemId>);
}
