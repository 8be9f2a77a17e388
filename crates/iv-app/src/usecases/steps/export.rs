use std::sync::Arc;

use chrono::{DateTime, Utc};
use iv_core::ports::{ClockPort, ConfigStorePort, TranslationPort};
use iv_core::tour::StepExportDocument;
use iv_core::TourResult;
use tracing::{info, info_span, Instrument};

use super::ResolveSteps;

/// Builds a downloadable document of a language's current list.
pub struct ExportSteps {
    resolve: ResolveSteps,
    clock: Arc<dyn ClockPort>,
}

impl ExportSteps {
    pub fn new(
        config_store: Arc<dyn ConfigStorePort>,
        translations: Arc<dyn TranslationPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            resolve: ResolveSteps::new(config_store, translations),
            clock,
        }
    }

    pub async fn execute(&self, language: &str) -> TourResult<StepExportDocument> {
        let span = info_span!("usecase.export_steps.execute", language = %language);

        async {
            let resolved = self.resolve.execute_for_admin(language).await?;
            let exported_at =
                DateTime::<Utc>::from_timestamp_millis(self.clock.now_ms()).unwrap_or_default();

            info!(
                language = %resolved.language.resolved,
                steps = resolved.steps.len(),
                "steps exported"
            );
            Ok(StepExportDocument::new(
                resolved.language.resolved,
                resolved.steps,
                exported_at,
            ))
        }
        .instrument(span)
        .await
    }
}
