use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use iv_core::ports::{ConfigStoreError, ConfigStorePort};
use tokio::fs;
use tokio::sync::Mutex;

use super::document::StoreDocument;

/// Config store persisted as one JSON document.
///
/// Every operation re-reads the file, and every write replaces it atomically
/// while holding the store lock, so a single-key write never loses another
/// key written through the same store.
pub struct FileConfigStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileConfigStore {
    /// Creates a store backed by the given file; the file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn dir(&self) -> Option<&Path> {
        self.path.parent()
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.dir() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create config store dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Reads the document; a missing file is an empty store.
    async fn read_document(&self) -> Result<StoreDocument> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoreDocument::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read config store failed: {}", self.path.display()))
            }
        };

        if content.trim().is_empty() {
            return Ok(StoreDocument::default());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("parse config store failed: {}", self.path.display()))
    }

    /// Writes to a sibling temp file and renames it over the target.
    async fn atomic_write(&self, document: &StoreDocument) -> Result<()> {
        self.ensure_parent_dir().await?;

        let content =
            serde_json::to_string_pretty(document).context("serialize config store failed")?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp config store failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp config store to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    async fn read<T>(&self, f: impl FnOnce(&StoreDocument) -> T) -> Result<T, ConfigStoreError> {
        let _guard = self.lock.lock().await;
        let document = self
            .read_document()
            .await
            .map_err(|e| ConfigStoreError::Read(format!("{e:#}")))?;
        Ok(f(&document))
    }

    /// Applies `f` and writes the document back when it reports a change.
    async fn modify(&self, f: impl FnOnce(&mut StoreDocument) -> bool) -> Result<(), ConfigStoreError> {
        let _guard = self.lock.lock().await;
        let mut document = self
            .read_document()
            .await
            .map_err(|e| ConfigStoreError::Read(format!("{e:#}")))?;

        if !f(&mut document) {
            return Ok(());
        }

        self.atomic_write(&document).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "config store write failed");
            ConfigStoreError::Write(format!("{e:#}"))
        })
    }
}

#[async_trait]
impl ConfigStorePort for FileConfigStore {
    async fn get_app_value(&self, key: &str) -> Result<Option<String>, ConfigStoreError> {
        self.read(|doc| doc.app.get(key).cloned()).await
    }

    async fn set_app_value(&self, key: &str, value: &str) -> Result<(), ConfigStoreError> {
        self.modify(|doc| {
            doc.app.insert(key.to_string(), value.to_string());
            true
        })
        .await
    }

    async fn delete_app_value(&self, key: &str) -> Result<(), ConfigStoreError> {
        self.modify(|doc| doc.app.remove(key).is_some()).await
    }

    async fn get_user_value(
        &self,
        user_id: &str,
        key: &str,
    ) -> Result<Option<String>, ConfigStoreError> {
        self.read(|doc| doc.user_value(user_id, key)).await
    }

    async fn set_user_value(
        &self,
        user_id: &str,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigStoreError> {
        self.modify(|doc| {
            doc.set_user_value(user_id, key, value);
            true
        })
        .await
    }

    async fn delete_user_value(&self, user_id: &str, key: &str) -> Result<(), ConfigStoreError> {
        self.modify(|doc| doc.delete_user_value(user_id, key)).await
    }

    async fn users_with_value(&self, key: &str) -> Result<Vec<String>, ConfigStoreError> {
        self.read(|doc| doc.users_with_value(key)).await
    }
}
