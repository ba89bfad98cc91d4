use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use url::Url;

use crate::catalog::swapi::DEFAULT_BASE_URL;
use crate::store::document::DEFAULT_COLLECTION;
use crate::storage::StorageConfig;

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageSection,
    pub catalog: CatalogSection,
    pub api: ApiSection,
    pub logging: LoggingSection,
}

impl AppConfig {
    /// Load configuration from disk and environment.
    ///
    /// Environment variables use the `PLANETS` prefix and `__` as the section
    /// separator, e.g. `PLANETS_CATALOG__BASE_URL`.
    pub fn load() -> Result<Self> {
        let config_path = env::var("PLANETS_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let mut builder = config::Config::builder();

        if Path::new(&config_path).exists() {
            builder = builder.add_source(config::File::from(PathBuf::from(&config_path)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("PLANETS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        let mut config: Self = settings.try_deserialize()?;

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        Ok(config)
    }

    /// Resolve the storage backend configuration.
    pub fn storage_runtime(&self) -> Result<StorageConfig> {
        self.storage.to_runtime()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub backend: StorageBackendKind,
    /// Collection (key prefix) planet documents are stored under
    pub collection: String,
    pub local: Option<LocalStorageSection>,
    pub s3: Option<S3StorageSection>,
}

impl StorageSection {
    pub fn to_runtime(&self) -> Result<StorageConfig> {
        match self.backend {
            StorageBackendKind::Local => {
                let local = self.local.clone().unwrap_or_default();
                Ok(StorageConfig::Local {
                    root_path: local.root_path,
                })
            }
            StorageBackendKind::S3 => {
                let s3 = self
                    .s3
                    .clone()
                    .context("storage.s3 configuration required when backend is 's3'")?;

                if s3.bucket.trim().is_empty() {
                    bail!("storage.s3.bucket must be specified");
                }
                if s3.region.trim().is_empty() {
                    bail!("storage.s3.region must be specified");
                }

                Ok(StorageConfig::S3 {
                    bucket: s3.bucket,
                    region: s3.region,
                    endpoint: s3.endpoint.filter(|e| !e.trim().is_empty()),
                })
            }
        }
    }

    pub fn collection(&self) -> Result<&str> {
        let collection = self.collection.trim_matches('/');
        if collection.is_empty() {
            bail!("storage.collection must not be empty");
        }
        Ok(collection)
    }
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::Local,
            collection: DEFAULT_COLLECTION.to_string(),
            local: Some(LocalStorageSection::default()),
            s3: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    #[default]
    Local,
    S3,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalStorageSection {
    pub root_path: String,
}

impl Default for LocalStorageSection {
    fn default() -> Self {
        Self {
            root_path: "./data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct S3StorageSection {
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl CatalogSection {
    /// Parsed base URL, always ending with `/`
    pub fn base_url(&self) -> Result<Url> {
        let mut url = Url::parse(self.base_url.trim())
            .with_context(|| format!("invalid catalog.base_url '{}'", self.base_url))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// Upper bound for a single store operation
    pub store_timeout_secs: u64,
    /// Answer reads of unknown ids with `200 null` instead of `404`
    pub null_body_for_missing_planet: bool,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            store_timeout_secs: 10,
            null_body_for_missing_planet: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}
