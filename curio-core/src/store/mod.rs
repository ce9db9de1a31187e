//! The media store: the data-service port and its two backends.

pub mod memory;
pub mod ports;
pub mod sqlite;

pub use memory::InMemoryDataService;
pub use ports::DataService;
pub use sqlite::{SqliteDataService, SqliteStoreOptions};

use std::sync::Arc;

use curio_model::{ItemType, Medium};

use crate::error::Result;

/// The canonical medium catalog, seeded into an empty backend by
/// [`DataService::initialize`].
pub(crate) fn medium_catalog() -> Vec<Medium> {
    vec![
        Medium::new(1, "CD", ItemType::Music),
        Medium::new(2, "Vinyl", ItemType::Music),
        Medium::new(3, "Hardcover", ItemType::Book),
        Medium::new(4, "Paperback", ItemType::Book),
        Medium::new(5, "DVD", ItemType::Video),
        Medium::new(6, "Blu-Ray", ItemType::Video),
    ]
}

/// Facade over a [`DataService`] backend.
///
/// Callers pick a backend once at construction and use the shared contract
/// from then on; both backends are substitutable.
#[derive(Clone)]
pub struct MediaStore {
    backend: Arc<dyn DataService>,
}

impl std::fmt::Debug for MediaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStore").finish_non_exhaustive()
    }
}

impl MediaStore {
    /// Open (creating if missing) the durable SQLite backend.
    pub async fn open_sqlite(options: SqliteStoreOptions) -> Result<Self> {
        let backend = Arc::new(SqliteDataService::connect(options).await?);
        Ok(Self { backend })
    }

    /// Volatile backend pre-seeded with demo data.
    pub fn in_memory() -> Self {
        Self {
            backend: Arc::new(InMemoryDataService::new()),
        }
    }

    /// Volatile backend with no seed items.
    pub fn in_memory_empty() -> Self {
        Self {
            backend: Arc::new(InMemoryDataService::empty()),
        }
    }

    pub fn backend(&self) -> &dyn DataService {
        self.backend.as_ref()
    }
}
