use std::sync::Arc;

use iv_core::keys::{WIZARD_COMPLETED, WIZARD_DISABLED, WIZARD_SKIPPED, WIZARD_STARTED};
use iv_core::ports::ConfigStorePort;
use iv_core::settings::{encode_flag, UserPreferencePatch};
use iv_core::{TourResult, UserPreference};
use tracing::{info, info_span, Instrument};

pub struct GetUserPreference {
    config_store: Arc<dyn ConfigStorePort>,
}

impl GetUserPreference {
    pub fn new(config_store: Arc<dyn ConfigStorePort>) -> Self {
        Self { config_store }
    }

    pub async fn execute(&self, user_id: &str) -> TourResult<UserPreference> {
        let span = info_span!("usecase.get_user_preference.execute", user_id = %user_id);

        async {
            let disabled = self.config_store.get_user_value(user_id, WIZARD_DISABLED).await?;
            let started = self.config_store.get_user_value(user_id, WIZARD_STARTED).await?;
            let completed = self.config_store.get_user_value(user_id, WIZARD_COMPLETED).await?;
            let skipped = self.config_store.get_user_value(user_id, WIZARD_SKIPPED).await?;

            Ok(UserPreference::from_stored(
                disabled.as_deref(),
                started.as_deref(),
                completed.as_deref(),
                skipped.as_deref(),
            ))
        }
        .instrument(span)
        .await
    }
}

/// Stores a user's own opt-out. A patch without the field writes nothing.
pub struct UpdateUserPreference {
    config_store: Arc<dyn ConfigStorePort>,
}

impl UpdateUserPreference {
    pub fn new(config_store: Arc<dyn ConfigStorePort>) -> Self {
        Self { config_store }
    }

    pub async fn execute(
        &self,
        user_id: &str,
        patch: UserPreferencePatch,
    ) -> TourResult<UserPreference> {
        let span = info_span!("usecase.update_user_preference.execute", user_id = %user_id);

        async {
            if let Some(flag) = &patch.wizard_disabled {
                let disabled = flag.is_truthy();
                self.config_store
                    .set_user_value(user_id, WIZARD_DISABLED, encode_flag(disabled))
                    .await?;
                info!(user_id = %user_id, disabled, "wizard opt-out updated");
            }

            GetUserPreference::new(self.config_store.clone())
                .execute(user_id)
                .await
        }
        .instrument(span)
        .await
    }
}
