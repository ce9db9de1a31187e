//! # Curio Core
//!
//! Core library for the Curio media collection manager: the data-service
//! contract, its durable (SQLite) and volatile (in-memory) backends, and the
//! page-navigation registry consumed by the UI shell.
//!
//! ## Overview
//!
//! - **Entity model**: re-exported from `curio-model` (items, mediums,
//!   taxonomies).
//! - **Data service**: trait-based contract with substitutable backends;
//!   callers obtain a [`MediaStore`], call
//!   [`initialize`](store::DataService::initialize) once, then perform reads,
//!   writes, and filtered queries.
//! - **Navigation**: name-to-page registry with loud failure on duplicate or
//!   unknown registrations.
//!
//! ## Example
//!
//! ```no_run
//! use curio_core::{DataService, MediaStore, Result};
//! use curio_model::{ItemId, ItemType, LocationType, MediaItem};
//!
//! async fn first_run() -> Result<()> {
//!     let store = MediaStore::in_memory_empty();
//!     store.backend().initialize().await?;
//!
//!     let cd = store
//!         .backend()
//!         .medium("CD")
//!         .await?
//!         .expect("seeded catalog contains CD");
//!
//!     let id = store
//!         .backend()
//!         .add_item(MediaItem {
//!             id: ItemId(0),
//!             name: "Abbey Road".to_owned(),
//!             media_type: ItemType::Music,
//!             location: Some(LocationType::InCollection),
//!             medium: cd,
//!         })
//!         .await?;
//!
//!     assert_eq!(id, ItemId(1));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod navigation;
pub mod store;

pub use error::{CollectionError, Result};
pub use navigation::Navigator;
pub use store::{
    DataService, InMemoryDataService, MediaStore, SqliteDataService, SqliteStoreOptions,
};

// Convenient re-export so callers need only one crate.
pub use curio_model as model;
