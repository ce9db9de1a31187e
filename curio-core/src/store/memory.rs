//! Volatile in-memory adapter for the data-service port.
//!
//! Used for demos and tests where durability is not required. Observably
//! identical to the SQLite adapter, including the max-plus-one id rule.

use std::sync::{Mutex, RwLock};

use async_trait::async_trait;

use curio_model::{ItemId, ItemType, LocationType, MediaItem, Medium};

use crate::error::{CollectionError, Result};
use crate::store::medium_catalog;
use crate::store::ports::DataService;

#[derive(Debug, Default)]
struct State {
    items: Vec<MediaItem>,
    mediums: Vec<Medium>,
    initialized: bool,
}

/// In-memory [`DataService`] over process-local ordered collections.
#[derive(Debug, Default)]
pub struct InMemoryDataService {
    state: RwLock<State>,
    selected: Mutex<Option<ItemId>>,
}

impl InMemoryDataService {
    /// Backend pre-seeded with the medium catalog and three example items.
    pub fn new() -> Self {
        let mediums = medium_catalog();
        let items = demo_items(&mediums);
        Self {
            state: RwLock::new(State {
                items,
                mediums,
                initialized: false,
            }),
            selected: Mutex::new(None),
        }
    }

    /// Backend with no seed data; `initialize()` still seeds the medium
    /// catalog, matching the durable adapter on a fresh file.
    pub fn empty() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, State>> {
        let guard = self.state.read().unwrap_or_else(|e| e.into_inner());
        if guard.initialized {
            Ok(guard)
        } else {
            Err(CollectionError::Uninitialized)
        }
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, State>> {
        let guard = self.state.write().unwrap_or_else(|e| e.into_inner());
        if guard.initialized {
            Ok(guard)
        } else {
            Err(CollectionError::Uninitialized)
        }
    }
}

fn demo_items(mediums: &[Medium]) -> Vec<MediaItem> {
    let seeds = [
        ("Classical Favorites", ItemType::Music, "CD"),
        ("Classic Fairy Tales", ItemType::Book, "Hardcover"),
        ("The Mummy", ItemType::Video, "Blu-Ray"),
    ];

    seeds
        .iter()
        .enumerate()
        .filter_map(|(index, (name, media_type, medium_name))| {
            let medium = mediums
                .iter()
                .find(|medium| medium.name == *medium_name)?
                .clone();
            Some(MediaItem {
                id: ItemId(index as i64 + 1),
                name: (*name).to_owned(),
                media_type: *media_type,
                location: Some(LocationType::InCollection),
                medium,
            })
        })
        .collect()
}

#[async_trait]
impl DataService for InMemoryDataService {
    async fn initialize(&self) -> Result<()> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        if state.mediums.is_empty() {
            state.mediums = medium_catalog();
            tracing::info!(count = state.mediums.len(), "seeded medium catalog");
        }
        state.initialized = true;
        drop(state);

        self.set_selected_item(None);
        Ok(())
    }

    async fn items(&self) -> Result<Vec<MediaItem>> {
        Ok(self.read()?.items.clone())
    }

    async fn item(&self, id: ItemId) -> Result<Option<MediaItem>> {
        Ok(self.read()?.items.iter().find(|item| item.id == id).cloned())
    }

    async fn add_item(&self, item: MediaItem) -> Result<ItemId> {
        let mut state = self.write()?;

        if !state
            .mediums
            .iter()
            .any(|medium| medium.id == item.medium_id())
        {
            return Err(CollectionError::Validation(format!(
                "medium {} does not exist",
                item.medium_id()
            )));
        }

        // One greater than the current maximum id, or 1 when empty.
        let id = state
            .items
            .iter()
            .map(|existing| existing.id.as_i64())
            .max()
            .map_or(1, |max| max + 1);

        state.items.push(item.with_id(id));
        Ok(ItemId(id))
    }

    async fn update_item(&self, item: MediaItem) -> Result<()> {
        let mut state = self.write()?;

        match state.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                *existing = item;
                Ok(())
            }
            None => Err(CollectionError::NotFound(format!("media item {}", item.id))),
        }
    }

    async fn delete_item(&self, item: &MediaItem) -> Result<()> {
        // Tolerant of absent ids, same as the durable adapter.
        self.write()?.items.retain(|existing| existing.id != item.id);
        Ok(())
    }

    async fn medium(&self, name: &str) -> Result<Option<Medium>> {
        Ok(self
            .read()?
            .mediums
            .iter()
            .find(|medium| medium.name == name)
            .cloned())
    }

    async fn mediums(&self) -> Result<Vec<Medium>> {
        Ok(self.read()?.mediums.clone())
    }

    async fn mediums_for(&self, item_type: ItemType) -> Result<Vec<Medium>> {
        Ok(self
            .read()?
            .mediums
            .iter()
            .filter(|medium| medium.media_type == item_type)
            .cloned()
            .collect())
    }

    fn selected_item(&self) -> Option<ItemId> {
        *self.selected.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_selected_item(&self, id: Option<ItemId>) {
        *self.selected.lock().unwrap_or_else(|e| e.into_inner()) = id;
    }
}
