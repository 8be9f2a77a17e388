use std::sync::Arc;

use iv_core::keys::steps_key;
use iv_core::ports::ConfigStorePort;
use iv_core::tour::{decode_record, encode_steps, DecodedRecord, Step};
use iv_core::TourResult;

/// Reads and writes the stored step list of one language.
pub struct StepListStore {
    config_store: Arc<dyn ConfigStorePort>,
}

impl StepListStore {
    pub fn new(config_store: Arc<dyn ConfigStorePort>) -> Self {
        Self { config_store }
    }

    /// `None` when nothing (or an empty string) is stored.
    pub async fn load(&self, language: &str) -> TourResult<Option<DecodedRecord>> {
        let Some(raw) = self
            .config_store
            .get_app_value_non_empty(&steps_key(language))
            .await?
        else {
            return Ok(None);
        };
        decode_record(language, &raw).map(Some)
    }

    pub async fn exists(&self, language: &str) -> TourResult<bool> {
        Ok(self
            .config_store
            .get_app_value_non_empty(&steps_key(language))
            .await?
            .is_some())
    }

    pub async fn save(&self, language: &str, steps: &[Step]) -> TourResult<()> {
        let raw = encode_steps(steps)?;
        self.save_raw(language, &raw).await
    }

    pub async fn save_raw(&self, language: &str, raw: &str) -> TourResult<()> {
        self.config_store
            .set_app_value(&steps_key(language), raw)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, language: &str) -> TourResult<()> {
        self.config_store.delete_app_value(&steps_key(language)).await?;
        Ok(())
    }
}
