//! Planet persistence
//!
//! [`PlanetStore`] is the capability the HTTP layer depends on. The
//! production implementation, [`DocumentStore`], keeps one JSON document per
//! planet in a [`crate::storage::StorageBackend`] collection.

use async_trait::async_trait;

use crate::types::{Filter, Planet, PlanetId};
use crate::Result;

pub mod document;

pub use document::DocumentStore;

/// CRUD operations over stored planets
#[async_trait]
pub trait PlanetStore: Send + Sync {
    /// Insert a planet under its id and return the stored value
    async fn save(&self, planet: Planet) -> Result<Planet>;

    /// Look a planet up by id; `Ok(None)` when no record matches
    async fn find_by_id(&self, id: PlanetId) -> Result<Option<Planet>>;

    /// All planets matching `filter`, in creation order
    async fn find_all(&self, filter: &Filter) -> Result<Vec<Planet>>;

    /// Delete the planet with `id`; absent ids are not an error
    async fn delete(&self, id: PlanetId) -> Result<()>;
}
