//! Config store port
//!
//! A string key/value store with an application scope and a per-user scope.
//! Every single-key read or write is atomic; nothing spans two keys.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigStoreError {
    #[error("config store read failed: {0}")]
    Read(String),

    #[error("config store write failed: {0}")]
    Write(String),
}

#[async_trait]
pub trait ConfigStorePort: Send + Sync {
    async fn get_app_value(&self, key: &str) -> Result<Option<String>, ConfigStoreError>;

    async fn set_app_value(&self, key: &str, value: &str) -> Result<(), ConfigStoreError>;

    /// Deleting a missing key is not an error.
    async fn delete_app_value(&self, key: &str) -> Result<(), ConfigStoreError>;

    async fn get_user_value(
        &self,
        user_id: &str,
        key: &str,
    ) -> Result<Option<String>, ConfigStoreError>;

    async fn set_user_value(
        &self,
        user_id: &str,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigStoreError>;

    async fn delete_user_value(&self, user_id: &str, key: &str) -> Result<(), ConfigStoreError>;

    /// Ids of the users holding a value under `key`, sorted and distinct.
    async fn users_with_value(&self, key: &str) -> Result<Vec<String>, ConfigStoreError>;

    /// Treats an empty stored string the same as a missing key.
    async fn get_app_value_non_empty(&self, key: &str) -> Result<Option<String>, ConfigStoreError> {
        Ok(self.get_app_value(key).await?.filter(|v| !v.is_empty()))
    }
}
