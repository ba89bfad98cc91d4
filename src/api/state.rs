//! API server state

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::CatalogClient;
use crate::config::ApiSection;
use crate::store::PlanetStore;
use crate::{Error, Result};

/// Handler behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiOptions {
    /// Deadline applied to every store call
    pub store_timeout: Duration,
    /// Reads of unknown ids answer `200 null` instead of `404`
    pub null_body_for_missing_planet: bool,
}

impl Default for ApiOptions {
    fn default() -> Self {
        ApiOptions::from(&ApiSection::default())
    }
}

impl From<&ApiSection> for ApiOptions {
    fn from(section: &ApiSection) -> Self {
        Self {
            store_timeout: Duration::from_secs(section.store_timeout_secs),
            null_body_for_missing_planet: section.null_body_for_missing_planet,
        }
    }
}

/// API server state
///
/// Immutable after startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PlanetStore>,
    pub catalog: Arc<dyn CatalogClient>,
    pub options: ApiOptions,
}

impl AppState {
    pub fn new(store: Arc<dyn PlanetStore>, catalog: Arc<dyn CatalogClient>) -> Self {
        Self {
            store,
            catalog,
            options: ApiOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ApiOptions) -> Self {
        self.options = options;
        self
    }

    /// Run a store call under the configured deadline
    pub async fn store_call<T, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.options.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                operation,
                after: self.options.store_timeout,
            }),
        }
    }
}
