use std::sync::Arc;

use iv_core::ports::{ConfigStorePort, TranslationPort};
use iv_core::TourResult;
use tracing::{info, info_span, Instrument};

use super::{ResolveSteps, StepListChange};
use crate::usecases::internal::StepListStore;

/// Discards a language's list and stores freshly translated defaults.
pub struct ResetSteps {
    resolve: ResolveSteps,
    store: StepListStore,
}

impl ResetSteps {
    pub fn new(
        config_store: Arc<dyn ConfigStorePort>,
        translations: Arc<dyn TranslationPort>,
    ) -> Self {
        Self {
            resolve: ResolveSteps::new(config_store.clone(), translations),
            store: StepListStore::new(config_store),
        }
    }

    pub async fn execute(&self, language: &str) -> TourResult<StepListChange> {
        let span = info_span!("usecase.reset_steps.execute", language = %language);

        async {
            let language = self.resolve.resolve_write_language(language)?;

            self.store.delete(&language.resolved).await?;
            let defaults = self.resolve.materialize(&language.resolved);
            self.store.save(&language.resolved, &defaults.steps).await?;

            info!(
                language = %language.resolved,
                steps = defaults.steps.len(),
                "steps reset to defaults"
            );
            Ok(StepListChange {
                language,
                steps: defaults.steps,
            })
        }
        .instrument(span)
        .await
    }
}
