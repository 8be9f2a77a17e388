use std::sync::Arc;

use iv_core::keys::{ENABLED_LANGUAGES, WIZARD_DISABLED, WIZARD_ENABLED, WIZARD_VERSION};
use iv_core::ports::{ConfigStorePort, TranslationPort, UserDirectoryPort};
use iv_core::settings::{
    encode_enabled_languages, encode_flag, parse_enabled_languages, parse_version, sanitize_enabled_languages,
    GlobalSettingsPatch,
};
use iv_core::{GlobalSettings, TourResult, BASE_LANGUAGE};
use tracing::{info, info_span, warn, Instrument};

/// Reads the admin settings.
///
/// [`Self::execute`] persists `["en"]` when no language set is stored.
/// [`Self::read`] reports the same default and writes nothing; end-user
/// paths use it.
pub struct GetGlobalSettings {
    config_store: Arc<dyn ConfigStorePort>,
}

impl GetGlobalSettings {
    pub fn new(config_store: Arc<dyn ConfigStorePort>) -> Self {
        Self { config_store }
    }

    pub async fn execute(&self) -> TourResult<GlobalSettings> {
        let span = info_span!("usecase.get_global_settings.execute");
        self.load(true).instrument(span).await
    }

    /// Same values as [`Self::execute`], but never writes.
    pub async fn read(&self) -> TourResult<GlobalSettings> {
        let span = info_span!("usecase.get_global_settings.read");
        self.load(false).instrument(span).await
    }

    async fn load(&self, persist_defaults: bool) -> TourResult<GlobalSettings> {
        let enabled = self.config_store.get_app_value(WIZARD_ENABLED).await?;
        let stored_languages = self.config_store.get_app_value(ENABLED_LANGUAGES).await?;
        let version = self.config_store.get_app_value(WIZARD_VERSION).await?;

        let languages = match parse_enabled_languages(stored_languages.as_deref()) {
            Some(languages) => languages,
            None => {
                let initial = vec![BASE_LANGUAGE.to_string()];
                if persist_defaults {
                    self.config_store
                        .set_app_value(ENABLED_LANGUAGES, &encode_enabled_languages(&initial))
                        .await?;
                    info!("enabled languages initialized");
                }
                initial
            }
        };

        Ok(GlobalSettings::from_stored(
            enabled.as_deref(),
            Some(languages),
            version.as_deref(),
        ))
    }
}

/// Applies an admin settings patch; absent fields are left untouched.
pub struct UpdateGlobalSettings {
    config_store: Arc<dyn ConfigStorePort>,
    translations: Arc<dyn TranslationPort>,
    user_directory: Arc<dyn UserDirectoryPort>,
}

impl UpdateGlobalSettings {
    pub fn new(
        config_store: Arc<dyn ConfigStorePort>,
        translations: Arc<dyn TranslationPort>,
        user_directory: Arc<dyn UserDirectoryPort>,
    ) -> Self {
        Self {
            config_store,
            translations,
            user_directory,
        }
    }

    pub async fn execute(&self, patch: GlobalSettingsPatch) -> TourResult<GlobalSettings> {
        let span = info_span!("usecase.update_global_settings.execute");

        async {
            if let Some(flag) = &patch.enabled {
                let enabled = flag.is_truthy();
                self.config_store
                    .set_app_value(WIZARD_ENABLED, encode_flag(enabled))
                    .await?;
                info!(enabled, "wizard enabled flag updated");
            }

            if let Some(requested) = &patch.enabled_languages {
                let available = self.translations.available_languages();
                let languages = sanitize_enabled_languages(requested, &available);
                self.config_store
                    .set_app_value(ENABLED_LANGUAGES, &encode_enabled_languages(&languages))
                    .await?;
                info!(languages = ?languages, "enabled languages updated");
            }

            if patch.wants_show_to_all() {
                self.show_to_all_users().await?;
            }

            GetGlobalSettings::new(self.config_store.clone()).execute().await
        }
        .instrument(span)
        .await
    }

    /// Clears every known opt-out, then bumps the wizard version.
    ///
    /// Each user write stands alone; a failed one is logged and skipped.
    async fn show_to_all_users(&self) -> TourResult<u64> {
        let mut users = match self.user_directory.list_user_ids().await {
            Ok(users) => users,
            Err(e) => {
                warn!(error = %e, "user directory unavailable, clearing stored opt-outs only");
                Vec::new()
            }
        };
        users.extend(self.config_store.users_with_value(WIZARD_DISABLED).await?);
        users.sort();
        users.dedup();

        let mut failed = 0usize;
        for user_id in &users {
            if let Err(e) = self
                .config_store
                .set_user_value(user_id, WIZARD_DISABLED, encode_flag(false))
                .await
            {
                failed += 1;
                warn!(user_id = %user_id, error = %e, "failed to clear wizard opt-out");
            }
        }

        let current = parse_version(self.config_store.get_app_value(WIZARD_VERSION).await?.as_deref());
        let next = current + 1;
        self.config_store
            .set_app_value(WIZARD_VERSION, &next.to_string())
            .await?;

        info!(users = users.len(), failed, version = next, "wizard shown to all users");
        Ok(next)
    }
}
