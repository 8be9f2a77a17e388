use std::sync::Arc;

use iv_core::ports::{ConfigStorePort, TranslationPort};
use iv_core::tour::{ensure_unique_ids, Step, StepDraft};
use iv_core::TourResult;
use tracing::{info, info_span, Instrument};

use super::{ResolveSteps, StepListChange};
use crate::usecases::internal::StepListStore;

/// Replaces the whole list of a language.
///
/// Every draft is validated before anything is written; one bad step
/// rejects the whole list.
pub struct SaveSteps {
    resolve: ResolveSteps,
    store: StepListStore,
}

impl SaveSteps {
    pub fn new(
        config_store: Arc<dyn ConfigStorePort>,
        translations: Arc<dyn TranslationPort>,
    ) -> Self {
        Self {
            resolve: ResolveSteps::new(config_store.clone(), translations),
            store: StepListStore::new(config_store),
        }
    }

    pub async fn execute(&self, language: &str, drafts: Vec<StepDraft>) -> TourResult<StepListChange> {
        let span = info_span!(
            "usecase.save_steps.execute",
            language = %language,
            steps = drafts.len()
        );

        async {
            let language = self.resolve.resolve_write_language(language)?;

            let steps = drafts
                .into_iter()
                .map(StepDraft::into_step)
                .collect::<TourResult<Vec<Step>>>()?;
            ensure_unique_ids(&steps)?;

            self.store.save(&language.resolved, &steps).await?;
            info!(language = %language.resolved, steps = steps.len(), "step list saved");

            Ok(StepListChange { language, steps })
        }
        .instrument(span)
        .await
    }
}
