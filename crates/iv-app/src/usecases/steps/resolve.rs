use std::sync::Arc;

use iv_core::l10n::Translator;
use iv_core::ports::{ConfigStorePort, TranslationPort};
use iv_core::tour::{materialize_defaults, MaterializedDefaults, Step};
use iv_core::language::{is_valid_language_code, normalize_language};
use iv_core::{LanguageResolution, TourError, TourResult};
use tracing::{debug, info, info_span, Instrument};

use crate::usecases::internal::StepListStore;

/// Step list of one language as it is stored after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSteps {
    pub language: LanguageResolution,
    pub steps: Vec<Step>,
    /// True when this read wrote the record (first materialization or migration).
    pub persisted: bool,
    /// Default-step keys that fell back while materializing.
    pub missing_translations: Vec<String>,
}

/// Computes the effective step list of a language.
///
/// ## Behavior
/// - Unsupported languages resolve to the base language
/// - Nothing stored: translated defaults are materialized and persisted
/// - Stored record missing per-step fields: migrated and rewritten once
/// - A corrupt record fails this language only
pub struct ResolveSteps {
    store: StepListStore,
    translations: Arc<dyn TranslationPort>,
}

impl ResolveSteps {
    pub fn new(
        config_store: Arc<dyn ConfigStorePort>,
        translations: Arc<dyn TranslationPort>,
    ) -> Self {
        Self {
            store: StepListStore::new(config_store),
            translations,
        }
    }

    pub fn resolve_language(&self, requested: &str) -> LanguageResolution {
        LanguageResolution::resolve(requested, &self.translations.available_languages())
    }

    /// Like [`Self::resolve_language`], but a code that is not a language
    /// code at all is a validation error instead of a fallback.
    pub fn resolve_admin_language(&self, requested: &str) -> TourResult<LanguageResolution> {
        if !is_valid_language_code(requested) {
            return Err(TourError::validation(format!(
                "Invalid language code '{requested}'"
            )));
        }
        Ok(self.resolve_language(requested))
    }

    /// Target language of an admin write. Only supported languages own a
    /// list, so a fallback here would overwrite the base language's list.
    pub fn resolve_write_language(&self, requested: &str) -> TourResult<LanguageResolution> {
        let language = self.resolve_admin_language(requested)?;
        if language.fallback {
            return Err(TourError::validation(format!(
                "Language '{}' is not supported",
                normalize_language(requested)
            )));
        }
        Ok(language)
    }

    pub async fn execute(&self, requested_language: &str) -> TourResult<ResolvedSteps> {
        let span = info_span!("usecase.resolve_steps.execute", language = %requested_language);

        async {
            let language = self.resolve_language(requested_language);
            self.resolve_or_initialize(language).await
        }
        .instrument(span)
        .await
    }

    /// Admin read: unfiltered, with strict language validation.
    pub async fn execute_for_admin(&self, requested_language: &str) -> TourResult<ResolvedSteps> {
        let span = info_span!("usecase.resolve_steps.execute_for_admin", language = %requested_language);

        async {
            let language = self.resolve_admin_language(requested_language)?;
            self.resolve_or_initialize(language).await
        }
        .instrument(span)
        .await
    }

    /// Resolves an already matched language.
    pub async fn resolve_or_initialize(
        &self,
        language: LanguageResolution,
    ) -> TourResult<ResolvedSteps> {
        if let Some(record) = self.store.load(&language.resolved).await? {
            let persisted = match record.rewritten {
                Some(raw) => {
                    self.store.save_raw(&language.resolved, &raw).await?;
                    info!(language = %language.resolved, "stored steps migrated");
                    true
                }
                None => false,
            };
            debug!(
                language = %language.resolved,
                steps = record.steps.len(),
                "stored steps loaded"
            );
            return Ok(ResolvedSteps {
                language,
                steps: record.steps,
                persisted,
                missing_translations: Vec::new(),
            });
        }

        let defaults = self.materialize(&language.resolved);
        self.store.save(&language.resolved, &defaults.steps).await?;
        info!(
            language = %language.resolved,
            missing = defaults.missing_translations.len(),
            "default steps materialized"
        );

        Ok(ResolvedSteps {
            language,
            steps: defaults.steps,
            persisted: true,
            missing_translations: defaults.missing_translations,
        })
    }

    pub(crate) fn materialize(&self, language: &str) -> MaterializedDefaults {
        let translator = Translator::for_language(self.translations.as_ref(), language);
        materialize_defaults(&translator)
    }
}
