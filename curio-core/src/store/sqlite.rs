//! Durable SQLite adapter for the data-service port.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};

use curio_model::{ItemId, ItemType, LocationType, MediaItem, Medium, MediumId};

use crate::error::{CollectionError, Result};
use crate::store::medium_catalog;
use crate::store::ports::DataService;

/// Fixed file name for the backing database.
pub const DB_FILE_NAME: &str = "media_collection.db";

/// Where and how to open the backing database file.
#[derive(Debug, Clone)]
pub struct SqliteStoreOptions {
    pub database_path: PathBuf,
    pub create_if_missing: bool,
}

impl Default for SqliteStoreOptions {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DB_FILE_NAME),
            create_if_missing: true,
        }
    }
}

impl SqliteStoreOptions {
    /// Open the database at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: path.into(),
            ..Self::default()
        }
    }

    /// Open the database under its fixed name inside `dir`, typically the
    /// application's private data directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::at(dir.as_ref().join(DB_FILE_NAME))
    }
}

// Plain INTEGER PRIMARY KEY (no AUTOINCREMENT): rowid assignment is
// max existing + 1, or 1 when the table is empty, which is the id rule the
// data-service contract documents and the in-memory backend implements.
const CREATE_MEDIUMS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS Mediums (
        Id INTEGER PRIMARY KEY,
        Name TEXT NOT NULL,
        MediumType INTEGER NOT NULL
    )";

const CREATE_MEDIA_ITEMS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS MediaItems (
        Id INTEGER PRIMARY KEY,
        Name TEXT NOT NULL,
        ItemType INTEGER NOT NULL,
        MediumId INTEGER NOT NULL,
        LocationType INTEGER,
        CONSTRAINT fk_mediums FOREIGN KEY (MediumId) REFERENCES Mediums (Id)
    )";

const SELECT_ITEMS: &str = "
    SELECT MediaItems.Id AS ItemId,
           MediaItems.Name AS ItemName,
           MediaItems.ItemType AS ItemType,
           MediaItems.LocationType AS LocationType,
           Mediums.Id AS MediumId,
           Mediums.Name AS MediumName,
           Mediums.MediumType AS MediumType
    FROM MediaItems
    JOIN Mediums ON Mediums.Id = MediaItems.MediumId";

/// SQLite-backed [`DataService`].
///
/// Item reads rejoin MediaItems to Mediums on every call rather than caching
/// the working set; the read-only medium catalog is cached in-process after
/// [`DataService::initialize`] and that cache slot doubles as the
/// initialized flag. The pool is capped at one connection, so operations
/// against the same service instance are serialized at the connection level;
/// the single-caller caveat on [`DataService`] still applies across service
/// instances sharing a file.
#[derive(Debug)]
pub struct SqliteDataService {
    pool: SqlitePool,
    mediums: RwLock<Option<Vec<Medium>>>,
    selected: Mutex<Option<ItemId>>,
}

impl SqliteDataService {
    /// Open the backing file and build the connection pool. Does not touch
    /// the schema; call [`DataService::initialize`] before anything else.
    pub async fn connect(options: SqliteStoreOptions) -> Result<Self> {
        let connect = SqliteConnectOptions::new()
            .filename(&options.database_path)
            .create_if_missing(options.create_if_missing)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect)
            .await?;

        tracing::debug!(path = %options.database_path.display(), "opened collection database");

        Ok(Self {
            pool,
            mediums: RwLock::new(None),
            selected: Mutex::new(None),
        })
    }

    fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Snapshot of the medium cache, or `Uninitialized` before the first
    /// `initialize()` call.
    fn cached_mediums(&self) -> Result<Vec<Medium>> {
        let guard = self.mediums.read().unwrap_or_else(|e| e.into_inner());
        guard.clone().ok_or(CollectionError::Uninitialized)
    }

    fn require_initialized(&self) -> Result<()> {
        let guard = self.mediums.read().unwrap_or_else(|e| e.into_inner());
        if guard.is_some() {
            Ok(())
        } else {
            Err(CollectionError::Uninitialized)
        }
    }

    async fn load_mediums(&self) -> Result<Vec<Medium>> {
        let rows = sqlx::query("SELECT Id, Name, MediumType FROM Mediums ORDER BY Id")
            .fetch_all(self.pool())
            .await?;

        rows.iter().map(medium_from_row).collect()
    }

    async fn medium_exists(&self, id: MediumId) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Mediums WHERE Id = ?")
            .bind(id.as_i64())
            .fetch_one(self.pool())
            .await?;

        Ok(count > 0)
    }
}

fn medium_from_row(row: &SqliteRow) -> Result<Medium> {
    Ok(Medium {
        id: MediumId(row.try_get("Id")?),
        name: row.try_get("Name")?,
        media_type: ItemType::try_from(row.try_get::<i64, _>("MediumType")?)?,
    })
}

/// Reconstruct an item and its embedded medium from one joined row.
fn item_from_row(row: &SqliteRow) -> Result<MediaItem> {
    let medium = Medium {
        id: MediumId(row.try_get("MediumId")?),
        name: row.try_get("MediumName")?,
        media_type: ItemType::try_from(row.try_get::<i64, _>("MediumType")?)?,
    };

    let location = row
        .try_get::<Option<i64>, _>("LocationType")?
        .map(LocationType::try_from)
        .transpose()?;

    Ok(MediaItem {
        id: ItemId(row.try_get("ItemId")?),
        name: row.try_get("ItemName")?,
        media_type: ItemType::try_from(row.try_get::<i64, _>("ItemType")?)?,
        location,
        medium,
    })
}

#[async_trait]
impl DataService for SqliteDataService {
    async fn initialize(&self) -> Result<()> {
        sqlx::query(CREATE_MEDIUMS_TABLE).execute(self.pool()).await?;
        sqlx::query(CREATE_MEDIA_ITEMS_TABLE)
            .execute(self.pool())
            .await?;

        let mut mediums = self.load_mediums().await?;
        if mediums.is_empty() {
            for medium in medium_catalog() {
                sqlx::query("INSERT INTO Mediums (Name, MediumType) VALUES (?, ?)")
                    .bind(&medium.name)
                    .bind(medium.media_type as i64)
                    .execute(self.pool())
                    .await?;
            }
            mediums = self.load_mediums().await?;
            tracing::info!(count = mediums.len(), "seeded medium catalog");
        }

        *self.mediums.write().unwrap_or_else(|e| e.into_inner()) = Some(mediums);
        self.set_selected_item(None);

        Ok(())
    }

    async fn items(&self) -> Result<Vec<MediaItem>> {
        self.require_initialized()?;

        let rows = sqlx::query(&format!("{SELECT_ITEMS} ORDER BY MediaItems.Id"))
            .fetch_all(self.pool())
            .await?;

        rows.iter().map(item_from_row).collect()
    }

    async fn item(&self, id: ItemId) -> Result<Option<MediaItem>> {
        self.require_initialized()?;

        let row = sqlx::query(&format!("{SELECT_ITEMS} WHERE MediaItems.Id = ?"))
            .bind(id.as_i64())
            .fetch_optional(self.pool())
            .await?;

        row.as_ref().map(item_from_row).transpose()
    }

    async fn add_item(&self, item: MediaItem) -> Result<ItemId> {
        self.require_initialized()?;

        if !self.medium_exists(item.medium_id()).await? {
            return Err(CollectionError::Validation(format!(
                "medium {} does not exist",
                item.medium_id()
            )));
        }

        // Id retrieval is part of the insert itself, not a follow-up query
        // in another session.
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO MediaItems (Name, ItemType, MediumId, LocationType) \
             VALUES (?, ?, ?, ?) RETURNING Id",
        )
        .bind(&item.name)
        .bind(item.media_type as i64)
        .bind(item.medium_id().as_i64())
        .bind(item.location.map(|location| location as i64))
        .fetch_one(self.pool())
        .await?;

        tracing::debug!(id, name = %item.name, "added media item");
        Ok(ItemId(id))
    }

    async fn update_item(&self, item: MediaItem) -> Result<()> {
        self.require_initialized()?;

        let result = sqlx::query(
            "UPDATE MediaItems \
             SET Name = ?, ItemType = ?, MediumId = ?, LocationType = ? \
             WHERE Id = ?",
        )
        .bind(&item.name)
        .bind(item.media_type as i64)
        .bind(item.medium_id().as_i64())
        .bind(item.location.map(|location| location as i64))
        .bind(item.id.as_i64())
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(CollectionError::NotFound(format!("media item {}", item.id)));
        }

        Ok(())
    }

    async fn delete_item(&self, item: &MediaItem) -> Result<()> {
        self.require_initialized()?;

        // Deleting an absent row is tolerated so a double delete succeeds.
        let result = sqlx::query("DELETE FROM MediaItems WHERE Id = ?")
            .bind(item.id.as_i64())
            .execute(self.pool())
            .await?;

        tracing::debug!(
            id = %item.id,
            deleted = result.rows_affected(),
            "deleted media item"
        );
        Ok(())
    }

    async fn medium(&self, name: &str) -> Result<Option<Medium>> {
        let mediums = self.cached_mediums()?;
        Ok(mediums.into_iter().find(|medium| medium.name == name))
    }

    async fn mediums(&self) -> Result<Vec<Medium>> {
        self.cached_mediums()
    }

    async fn mediums_for(&self, item_type: ItemType) -> Result<Vec<Medium>> {
        let mediums = self.cached_mediums()?;
        Ok(mediums
            .into_iter()
            .filter(|medium| medium.media_type == item_type)
            .collect())
    }

    fn selected_item(&self) -> Option<ItemId> {
        *self.selected.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_selected_item(&self, id: Option<ItemId>) {
        *self.selected.lock().unwrap_or_else(|e| e.into_inner()) = id;
    }
}
