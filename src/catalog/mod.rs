//! Planet catalog lookups
//!
//! The catalog is an external, read-only reference of known planets. Only
//! the SWAPI search endpoint is implemented.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

pub mod swapi;

pub use swapi::SwapiClient;

/// Looks planets up by name in an external catalog
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Search the catalog for `name`
    ///
    /// Returns `Ok(None)` when the catalog reports the planet as not found.
    async fn lookup_by_name(&self, name: &str) -> Result<Option<CatalogSearch>>;
}

/// One page of catalog search results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSearch {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<CatalogPlanet>,
}

impl CatalogSearch {
    /// Number of films the best match appears in, if there is a match
    pub fn appearance_quantity(&self) -> Option<usize> {
        self.results.first().map(|planet| planet.films.len())
    }
}

/// A catalog planet entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogPlanet {
    pub name: String,
    pub diameter: String,
    pub gravity: String,
    pub population: String,
    pub climate: String,
    pub terrain: String,
    pub created: String,
    pub edited: String,
    pub url: String,
    pub residents: Vec<String>,
    pub films: Vec<String>,
}
