//! SWAPI (Star Wars API) catalog client

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::{Error, Result};

use super::{CatalogClient, CatalogSearch};

/// Default public SWAPI endpoint
pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api/";

/// HTTP client for the SWAPI planet search endpoint
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct SwapiClient {
    client: reqwest::Client,
    base_url: Arc<Url>,
}

impl SwapiClient {
    /// Build a client whose requests are bounded by `timeout`
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("planets/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            client,
            base_url: Arc::new(base_url),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn search_url(&self, name: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join("planets/")
            .map_err(|e| Error::internal(format!("invalid catalog url: {}", e)))?;
        url.query_pairs_mut().append_pair("search", name);
        Ok(url)
    }
}

#[async_trait]
impl CatalogClient for SwapiClient {
    async fn lookup_by_name(&self, name: &str) -> Result<Option<CatalogSearch>> {
        let url = self.search_url(name)?;
        tracing::debug!(%url, "Searching catalog");

        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(planet = name, "Catalog reported planet as not found");
            return Ok(None);
        }

        let search: CatalogSearch = response.error_for_status()?.json().await?;
        tracing::debug!(planet = name, count = search.results.len(), "Catalog search completed");

        Ok(Some(search))
    }
}
