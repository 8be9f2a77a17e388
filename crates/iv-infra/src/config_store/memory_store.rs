use async_trait::async_trait;
use iv_core::ports::{ConfigStoreError, ConfigStorePort};
use tokio::sync::Mutex;

use super::document::StoreDocument;

/// Config store that lives only as long as the process.
#[derive(Default)]
pub struct InMemoryConfigStore {
    document: Mutex<StoreDocument>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStorePort for InMemoryConfigStore {
    async fn get_app_value(&self, key: &str) -> Result<Option<String>, ConfigStoreError> {
        Ok(self.document.lock().await.app.get(key).cloned())
    }

    async fn set_app_value(&self, key: &str, value: &str) -> Result<(), ConfigStoreError> {
        self.document
            .lock()
            .await
            .app
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete_app_value(&self, key: &str) -> Result<(), ConfigStoreError> {
        self.document.lock().await.app.remove(key);
        Ok(())
    }

    async fn get_user_value(
        &self,
        user_id: &str,
        key: &str,
    ) -> Result<Option<String>, ConfigStoreError> {
        Ok(self.document.lock().await.user_value(user_id, key))
    }

    async fn set_user_value(
        &self,
        user_id: &str,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigStoreError> {
        self.document.lock().await.set_user_value(user_id, key, value);
        Ok(())
    }

    async fn delete_user_value(&self, user_id: &str, key: &str) -> Result<(), ConfigStoreError> {
        self.document.lock().await.delete_user_value(user_id, key);
        Ok(())
    }

    async fn users_with_value(&self, key: &str) -> Result<Vec<String>, ConfigStoreError> {
        Ok(self.document.lock().await.users_with_value(key))
    }
}
