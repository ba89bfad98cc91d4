//! JSON document store on top of a storage backend

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::storage::StorageBackend;
use crate::types::{Filter, Planet, PlanetId};
use crate::{Error, Result};

use super::PlanetStore;

/// Default collection name
pub const DEFAULT_COLLECTION: &str = "planets";

/// Persisted representation of a planet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanetDocument {
    #[serde(rename = "_id")]
    id: PlanetId,
    name: String,
    weather: String,
    land: String,
    appearance_quantity: usize,
}

impl From<Planet> for PlanetDocument {
    fn from(planet: Planet) -> Self {
        Self {
            id: planet.id,
            name: planet.name,
            weather: planet.weather,
            land: planet.land,
            appearance_quantity: planet.appearance_quantity,
        }
    }
}

impl From<PlanetDocument> for Planet {
    fn from(doc: PlanetDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            weather: doc.weather,
            land: doc.land,
            appearance_quantity: doc.appearance_quantity,
        }
    }
}

/// Planet collection stored as `<collection>/<id>.json` objects
pub struct DocumentStore {
    storage: Arc<dyn StorageBackend>,
    collection: String,
}

impl DocumentStore {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self::with_collection(storage, DEFAULT_COLLECTION)
    }

    pub fn with_collection(storage: Arc<dyn StorageBackend>, collection: impl Into<String>) -> Self {
        let collection = collection.into().trim_matches('/').to_string();
        Self {
            storage,
            collection,
        }
    }

    fn document_key(&self, id: PlanetId) -> String {
        format!("{}/{}.json", self.collection, id)
    }

    /// Recover the id from a listed key, ignoring anything that is not a document
    fn parse_key(key: &str) -> Option<PlanetId> {
        let file_name = key.rsplit('/').next()?;
        file_name.strip_suffix(".json")?.parse().ok()
    }

    async fn read(&self, id: PlanetId) -> Result<Option<Planet>> {
        let key = self.document_key(id);
        let data = match self.storage.get(&key).await {
            Ok(data) => data,
            Err(Error::ObjectNotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        let doc: PlanetDocument = serde_json::from_slice(&data)?;
        if doc.id != id {
            return Err(Error::storage(format!(
                "document {} holds mismatched id {}",
                key, doc.id
            )));
        }

        Ok(Some(doc.into()))
    }
}

#[async_trait]
impl PlanetStore for DocumentStore {
    async fn save(&self, planet: Planet) -> Result<Planet> {
        let key = self.document_key(planet.id);
        let doc = PlanetDocument::from(planet.clone());
        let data = serde_json::to_vec(&doc)?;

        self.storage.put(&key, Bytes::from(data)).await?;
        tracing::debug!(%key, "Stored planet document");

        Ok(planet)
    }

    async fn find_by_id(&self, id: PlanetId) -> Result<Option<Planet>> {
        self.read(id).await
    }

    async fn find_all(&self, filter: &Filter) -> Result<Vec<Planet>> {
        let prefix = format!("{}/", self.collection);
        let mut ids: Vec<PlanetId> = self
            .storage
            .list(&prefix)
            .await?
            .iter()
            .filter_map(|key| Self::parse_key(key))
            .collect();
        ids.sort();
        ids.dedup();

        let mut planets = Vec::new();
        for id in ids {
            // Deleted between list and read
            let Some(planet) = self.read(id).await? else {
                continue;
            };
            if filter.matches(&planet) {
                planets.push(planet);
            }
        }

        Ok(planets)
    }

    async fn delete(&self, id: PlanetId) -> Result<()> {
        let key = self.document_key(id);
        self.storage.delete(&key).await?;
        tracing::debug!(%key, "Deleted planet document");
        Ok(())
    }
}
