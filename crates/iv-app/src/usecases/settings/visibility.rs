use std::sync::Arc;

use iv_core::ports::{ConfigStorePort, TranslationPort};
use iv_core::settings::EffectiveVisibility;
use iv_core::{GlobalSettings, LanguageResolution, TourResult};
use tracing::{debug, info_span, Instrument};

use super::{GetGlobalSettings, GetUserPreference};

/// Decides whether a user sees the tour in a language.
///
/// The language check runs against the language the steps would be served
/// in, so an unsupported request is judged as its fallback. Read only.
pub struct EvaluateVisibility {
    config_store: Arc<dyn ConfigStorePort>,
    translations: Arc<dyn TranslationPort>,
}

impl EvaluateVisibility {
    pub fn new(
        config_store: Arc<dyn ConfigStorePort>,
        translations: Arc<dyn TranslationPort>,
    ) -> Self {
        Self {
            config_store,
            translations,
        }
    }

    pub async fn execute(&self, user_id: &str, language: &str) -> TourResult<EffectiveVisibility> {
        let span = info_span!(
            "usecase.evaluate_visibility.execute",
            user_id = %user_id,
            language = %language
        );

        async {
            let settings = GetGlobalSettings::new(self.config_store.clone()).read().await?;
            let language =
                LanguageResolution::resolve(language, &self.translations.available_languages());
            self.evaluate(&settings, user_id, &language).await
        }
        .instrument(span)
        .await
    }

    /// Evaluates against settings the caller already loaded.
    pub async fn evaluate(
        &self,
        settings: &GlobalSettings,
        user_id: &str,
        language: &LanguageResolution,
    ) -> TourResult<EffectiveVisibility> {
        let preference = GetUserPreference::new(self.config_store.clone())
            .execute(user_id)
            .await?;

        let visibility = EffectiveVisibility::evaluate(settings, &language.resolved, &preference);
        debug!(
            visible = visibility.visible,
            reason = ?visibility.reason,
            language = %language.resolved,
            "visibility evaluated"
        );
        Ok(visibility)
    }
}
