//! Storage abstraction layer
//!
//! Object storage the planet documents live in. Local filesystem for
//! single-host deployments and tests, S3 (or an S3-compatible service) for
//! everything else.

use async_trait::async_trait;
use bytes::Bytes;

use crate::Result;

pub mod local;
pub mod s3;

/// Storage backend trait
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read object from storage
    ///
    /// Fails with [`crate::Error::ObjectNotFound`] when the key does not exist.
    async fn get(&self, key: &str) -> Result<Bytes>;

    /// Write object to storage, replacing any previous value
    async fn put(&self, key: &str, data: Bytes) -> Result<()>;

    /// Delete object from storage; missing keys are not an error
    async fn delete(&self, key: &str) -> Result<()>;

    /// List object keys under a prefix
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    S3 {
        bucket: String,
        region: String,
        endpoint: Option<String>,
    },
    Local {
        root_path: String,
    },
}

/// Create storage backend from config
pub async fn create_storage(config: StorageConfig) -> Result<Box<dyn StorageBackend>> {
    match config {
        StorageConfig::S3 {
            bucket,
            region,
            endpoint,
        } => {
            tracing::info!(%bucket, %region, ?endpoint, "Using S3 storage");
            let backend = s3::S3Storage::new(bucket, region, endpoint).await?;
            Ok(Box::new(backend))
        }
        StorageConfig::Local { root_path } => {
            tracing::info!(path = %root_path, "Using local storage");
            let backend = local::LocalStorage::new(root_path)?;
            Ok(Box::new(backend))
        }
    }
}
