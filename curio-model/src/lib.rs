//! Core data model definitions shared across Curio crates.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod media;
pub mod taxonomy;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use ids::{ItemId, MediumId};
pub use media::{MediaItem, Medium};
pub use taxonomy::{ItemType, LocationType};
