use std::sync::Arc;

use iv_core::ports::{ConfigStorePort, TranslationPort};
use iv_core::tour::StepExportDocument;
use iv_core::TourResult;
use serde_json::Value;
use tracing::{info, info_span, Instrument};

use super::{ResolveSteps, StepListChange};
use crate::usecases::internal::StepListStore;

/// Replaces a language's list with the steps of an export document.
///
/// The document must name the same language it is imported into.
pub struct ImportSteps {
    resolve: ResolveSteps,
    store: StepListStore,
}

impl ImportSteps {
    pub fn new(
        config_store: Arc<dyn ConfigStorePort>,
        translations: Arc<dyn TranslationPort>,
    ) -> Self {
        Self {
            resolve: ResolveSteps::new(config_store.clone(), translations),
            store: StepListStore::new(config_store),
        }
    }

    pub async fn execute(&self, language: &str, document: &Value) -> TourResult<StepListChange> {
        let span = info_span!("usecase.import_steps.execute", language = %language);

        async {
            let language = self.resolve.resolve_write_language(language)?;
            let steps = StepExportDocument::parse_import(document, &language.resolved)?;

            self.store.save(&language.resolved, &steps).await?;
            info!(language = %language.resolved, steps = steps.len(), "steps imported");

            Ok(StepListChange { language, steps })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::steps::ExportSteps;
    use crate::usecases::test_support::Harness;
    use iv_core::keys::steps_key;
    use iv_core::TourError;
    use serde_json::json;

    #[tokio::test]
    async fn export_then_import_into_fresh_store_restores_list() {
        let source = Harness::new();
        let doc = ExportSteps::new(
            source.config_store(),
            source.translations.clone(),
            source.clock.clone(),
        )
        .execute("nl")
        .await
        .unwrap();

        let target = Harness::new();
        let change = ImportSteps::new(target.config_store(), target.translations.clone())
            .execute("nl", &serde_json::to_value(&doc).unwrap())
            .await
            .unwrap();

        assert_eq!(change.steps, doc.steps);
        let stored = ResolveSteps::new(target.config_store(), target.translations.clone())
            .execute("nl")
            .await
            .unwrap();
        assert_eq!(stored.steps, doc.steps);
    }

    #[tokio::test]
    async fn loosely_stored_record_round_trips_through_export() {
        let source = Harness::new();
        source
            .seed_app(
                &steps_key("en"),
                &json!([
                    {"id": "blank", "title": "", "enabled": true},
                    {"id": "twice", "title": "Twice", "enabled": true, "visibleToGroups": ["staff", "staff"]}
                ])
                .to_string(),
            )
            .await;
        let doc = ExportSteps::new(
            source.config_store(),
            source.translations.clone(),
            source.clock.clone(),
        )
        .execute("en")
        .await
        .unwrap();

        let target = Harness::new();
        let change = ImportSteps::new(target.config_store(), target.translations.clone())
            .execute("en", &serde_json::to_value(&doc).unwrap())
            .await
            .unwrap();

        assert_eq!(change.steps, doc.steps);
        assert_eq!(change.steps[0].title, "");
        assert_eq!(change.steps[1].visible_to_groups.len(), 2);
    }

    #[tokio::test]
    async fn language_mismatch_is_rejected_before_writing() {
        let h = Harness::new();
        let doc = json!({
            "version": "1.0",
            "language": "en",
            "steps": [{"id": "a", "title": "A"}]
        });

        let err = ImportSteps::new(h.config_store(), h.translations.clone())
            .execute("nl", &doc)
            .await
            .unwrap_err();

        assert!(matches!(err, TourError::Validation(_)));
        assert_eq!(h.store.writes(), 0);
    }

    #[tokio::test]
    async fn imported_steps_without_enabled_are_enabled() {
        let h = Harness::new();
        let doc = json!({
            "language": "en",
            "steps": [{"id": "a", "title": "A"}, {"id": "b", "title": "B", "enabled": false}]
        });

        let change = ImportSteps::new(h.config_store(), h.translations.clone())
            .execute("en", &doc)
            .await
            .unwrap();

        assert!(change.steps[0].enabled);
        assert!(!change.steps[1].enabled);
    }
}
