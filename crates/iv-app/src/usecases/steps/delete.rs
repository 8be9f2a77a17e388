use std::sync::Arc;

use iv_core::ports::{ConfigStorePort, TranslationPort};
use iv_core::TourResult;
use tracing::{debug, info, info_span, Instrument};

use super::{ResolveSteps, StepRemoval};
use crate::usecases::internal::StepListStore;

/// Removes every step with the given id; an unknown id is a no-op.
pub struct DeleteStep {
    resolve: ResolveSteps,
    store: StepListStore,
}

impl DeleteStep {
    pub fn new(
        config_store: Arc<dyn ConfigStorePort>,
        translations: Arc<dyn TranslationPort>,
    ) -> Self {
        Self {
            resolve: ResolveSteps::new(config_store.clone(), translations),
            store: StepListStore::new(config_store),
        }
    }

    pub async fn execute(&self, language: &str, id: &str) -> TourResult<StepRemoval> {
        let span = info_span!("usecase.delete_step.execute", language = %language, step_id = %id);

        async {
            let language = self.resolve.resolve_write_language(language)?;
            let mut resolved = self.resolve.resolve_or_initialize(language).await?;

            let before = resolved.steps.len();
            resolved.steps.retain(|s| s.id != id);
            let removed = before - resolved.steps.len();

            if removed == 0 {
                debug!(language = %resolved.language.resolved, step_id = %id, "nothing to delete");
            } else {
                self.store.save(&resolved.language.resolved, &resolved.steps).await?;
                info!(language = %resolved.language.resolved, step_id = %id, removed, "step deleted");
            }

            Ok(StepRemoval {
                language: resolved.language,
                removed,
            })
        }
        .instrument(span)
        .await
    }
}
