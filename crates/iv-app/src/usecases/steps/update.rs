use std::sync::Arc;

use iv_core::ports::{ConfigStorePort, TranslationPort};
use iv_core::tour::StepDraft;
use iv_core::{TourError, TourResult};
use tracing::{info, info_span, Instrument};

use super::{ResolveSteps, StepChange};
use crate::usecases::internal::StepListStore;

/// Replaces every field of a step except its id.
pub struct UpdateStep {
    resolve: ResolveSteps,
    store: StepListStore,
}

impl UpdateStep {
    pub fn new(
        config_store: Arc<dyn ConfigStorePort>,
        translations: Arc<dyn TranslationPort>,
    ) -> Self {
        Self {
            resolve: ResolveSteps::new(config_store.clone(), translations),
            store: StepListStore::new(config_store),
        }
    }

    pub async fn execute(&self, language: &str, id: &str, draft: StepDraft) -> TourResult<StepChange> {
        let span = info_span!("usecase.update_step.execute", language = %language, step_id = %id);

        async {
            let language = self.resolve.resolve_write_language(language)?;
            let mut resolved = self.resolve.resolve_or_initialize(language).await?;

            let index = resolved
                .steps
                .iter()
                .position(|s| s.id == id)
                .ok_or_else(|| TourError::StepNotFound { id: id.to_string() })?;

            // The id in the path wins over any id in the payload.
            let step = draft.into_step_with_id(id)?;
            resolved.steps[index] = step.clone();
            self.store.save(&resolved.language.resolved, &resolved.steps).await?;

            info!(language = %resolved.language.resolved, step_id = %id, "step updated");
            Ok(StepChange {
                language: resolved.language,
                step,
            })
        }
        .instrument(span)
        .await
    }
}
