//! Local filesystem storage backend

use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{Error, Result};

use super::StorageBackend;

const TMP_EXTENSION_PREFIX: &str = "tmp-";

/// Local filesystem storage
///
/// Keys map to paths relative to `root_path`.
pub struct LocalStorage {
    root_path: PathBuf,
}

impl LocalStorage {
    /// Open `root_path`, removing temporary files left by interrupted writes
    pub fn new(root_path: impl Into<PathBuf>) -> Result<Self> {
        let root_path = root_path.into();
        std::fs::create_dir_all(&root_path)?;

        let removed = sweep_tmp_files(&root_path)?;
        if removed > 0 {
            tracing::warn!(root = %root_path.display(), removed, "Removed stale temporary files");
        }

        Ok(Self { root_path })
    }

    fn resolve_path(&self, key: &str) -> PathBuf {
        self.root_path.join(key)
    }
}

fn is_tmp_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.starts_with(TMP_EXTENSION_PREFIX))
}

fn sweep_tmp_files(dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            removed += sweep_tmp_files(&path)?;
        } else if is_tmp_file(&path) {
            std::fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Temporary file removed on drop unless persisted
///
/// Covers `put` futures dropped between write and rename.
struct TmpFile {
    path: PathBuf,
    persisted: bool,
}

impl TmpFile {
    fn for_target(target: &Path) -> Self {
        let extension = format!("{}{:016x}", TMP_EXTENSION_PREFIX, fastrand::u64(..));
        Self {
            path: target.with_extension(extension),
            persisted: false,
        }
    }

    async fn persist(mut self, target: &Path) -> Result<()> {
        fs::rename(&self.path, target).await?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for TmpFile {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

#[async_trait]
impl StorageBackend for LocalStorage {
    async fn get(&self, key: &str) -> Result<Bytes> {
        let path = self.resolve_path(key);
        match fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::ObjectNotFound(key.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, data: Bytes) -> Result<()> {
        let path = self.resolve_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Readers never observe a partially written object
        let tmp = TmpFile::for_target(&path);
        fs::write(&tmp.path, &data).await?;
        tmp.persist(&path).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.resolve_path(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let prefix_path = self.resolve_path(prefix);
        let mut results = Vec::new();

        if !fs::try_exists(&prefix_path).await? {
            return Ok(results);
        }

        let mut entries = fs::read_dir(&prefix_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if let Ok(relative) = path.strip_prefix(&self.root_path) {
                if let Some(s) = relative.to_str() {
                    results.push(s.replace('\\', "/"));
                }
            }
        }

        results.sort();
        Ok(results)
    }
}
