use std::sync::Arc;

use iv_core::ports::{ConfigStorePort, TranslationPort, UserDirectoryPort};
use iv_core::settings::EffectiveVisibility;
use iv_core::tour::{filter_enabled, filter_visible};
use iv_core::{LanguageResolution, Step, TourResult};
use tracing::{debug, info_span, warn, Instrument};

use crate::usecases::settings::{EvaluateVisibility, GetGlobalSettings};
use crate::usecases::steps::ResolveSteps;

/// What the tour renderer receives for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSteps {
    pub visibility: EffectiveVisibility,
    pub language: LanguageResolution,
    /// Empty whenever the tour is hidden.
    pub steps: Vec<Step>,
    pub wizard_version: u64,
    pub missing_translations: Vec<String>,
}

/// Effective steps for a user: visibility first, then the enabled and
/// group predicates over the resolved list.
///
/// Settings are read once per call and never written here.
pub struct GetWizardSteps {
    config_store: Arc<dyn ConfigStorePort>,
    resolve: ResolveSteps,
    visibility: EvaluateVisibility,
    user_directory: Arc<dyn UserDirectoryPort>,
}

impl GetWizardSteps {
    pub fn new(
        config_store: Arc<dyn ConfigStorePort>,
        translations: Arc<dyn TranslationPort>,
        user_directory: Arc<dyn UserDirectoryPort>,
    ) -> Self {
        Self {
            resolve: ResolveSteps::new(config_store.clone(), translations.clone()),
            visibility: EvaluateVisibility::new(config_store.clone(), translations),
            config_store,
            user_directory,
        }
    }

    pub async fn execute(&self, user_id: &str, language: &str) -> TourResult<WizardSteps> {
        let span = info_span!("usecase.get_wizard_steps.execute", user_id = %user_id, language = %language);

        async {
            let settings = GetGlobalSettings::new(self.config_store.clone()).read().await?;
            let language = self.resolve.resolve_language(language);
            let visibility = self.visibility.evaluate(&settings, user_id, &language).await?;

            if !visibility.is_visible() {
                debug!(reason = ?visibility.reason, "tour hidden for user");
                return Ok(WizardSteps {
                    visibility,
                    language,
                    steps: Vec::new(),
                    wizard_version: settings.wizard_version,
                    missing_translations: Vec::new(),
                });
            }

            let resolved = self.resolve.resolve_or_initialize(language).await?;

            let groups = match self.user_directory.groups_for_user(user_id).await {
                Ok(groups) => groups,
                Err(e) => {
                    warn!(user_id = %user_id, error = %e, "groups unavailable, showing ungrouped steps only");
                    Vec::new()
                }
            };
            let steps = filter_visible(filter_enabled(resolved.steps), &groups);

            debug!(steps = steps.len(), groups = groups.len(), "wizard steps filtered");
            Ok(WizardSteps {
                visibility,
                language: resolved.language,
                steps,
                wizard_version: settings.wizard_version,
                missing_translations: resolved.missing_translations,
            })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{Harness, MockDirectory};
    use iv_core::keys::{steps_key, ENABLED_LANGUAGES, WIZARD_DISABLED, WIZARD_VERSION};
    use iv_core::ports::DirectoryError;
    use iv_core::settings::HiddenReason;
    use serde_json::json;

    fn usecase(h: &Harness) -> GetWizardSteps {
        GetWizardSteps::new(h.config_store(), h.translations.clone(), h.directory.clone())
    }

    async fn seed_grouped_steps(h: &Harness) {
        h.seed_app(
            &steps_key("en"),
            &json!([
                {"id": "all", "title": "Everyone", "enabled": true},
                {"id": "staff", "title": "Staff only", "enabled": true, "visibleToGroups": ["staff"]},
                {"id": "off", "title": "Disabled", "enabled": false},
                {"id": "admins", "title": "Admins only", "enabled": true, "visibleToGroups": ["admin"]}
            ])
            .to_string(),
        )
        .await;
    }

    fn ids(result: &WizardSteps) -> Vec<&str> {
        result.steps.iter().map(|s| s.id.as_str()).collect()
    }

    #[tokio::test]
    async fn steps_are_filtered_by_groups_and_enabled_flag() {
        let h = Harness::new();
        seed_grouped_steps(&h).await;
        let uc = usecase(&h);

        let alice = uc.execute("alice", "en").await.unwrap();
        assert_eq!(ids(&alice), ["all", "staff", "admins"]);

        let bob = uc.execute("bob", "en").await.unwrap();
        assert_eq!(ids(&bob), ["all", "staff"]);

        let carol = uc.execute("carol", "en").await.unwrap();
        assert_eq!(ids(&carol), ["all"]);
    }

    #[tokio::test]
    async fn hidden_tour_returns_no_steps_and_writes_no_list() {
        let h = Harness::new();
        h.seed_user("bob", WIZARD_DISABLED, "true").await;
        h.seed_app(WIZARD_VERSION, "3").await;

        let result = usecase(&h).execute("bob", "en").await.unwrap();

        assert_eq!(result.visibility.reason, Some(HiddenReason::UserOptedOut));
        assert!(result.steps.is_empty());
        assert_eq!(result.wizard_version, 3);
        assert!(h.app_value(&steps_key("en")).await.is_none());
    }

    #[tokio::test]
    async fn directory_failure_shows_ungrouped_steps() {
        let mut directory = MockDirectory::new();
        directory
            .expect_groups_for_user()
            .returning(|_| Err(DirectoryError::Unavailable("timeout".into())));
        let h = Harness::with_directory(Arc::new(directory));
        seed_grouped_steps(&h).await;

        let result = usecase(&h).execute("alice", "en").await.unwrap();
        assert_eq!(ids(&result), ["all"]);
    }

    #[tokio::test]
    async fn first_visit_materializes_defaults() {
        let h = Harness::new();

        let result = usecase(&h).execute("carol", "en").await.unwrap();

        assert!(result.visibility.is_visible());
        assert_eq!(result.steps.len(), 8);
        assert!(h.app_value(&steps_key("en")).await.is_some());
    }

    #[tokio::test]
    async fn unsupported_language_serves_visible_base_steps() {
        let h = Harness::new();

        let result = usecase(&h).execute("bob", "ja").await.unwrap();

        assert!(result.visibility.is_visible());
        assert_eq!(result.language.resolved, "en");
        assert!(result.language.fallback);
        assert_eq!(result.steps.len(), 8);
    }

    #[tokio::test]
    async fn settings_are_not_written_on_the_user_path() {
        let h = Harness::new();

        usecase(&h).execute("bob", "en").await.unwrap();

        assert_eq!(h.app_value(ENABLED_LANGUAGES).await, None);
        assert!(h.app_value(&steps_key("en")).await.is_some());
        assert_eq!(h.store.writes(), 1);
    }
}
