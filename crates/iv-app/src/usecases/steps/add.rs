use std::sync::Arc;

use iv_core::ports::{ConfigStorePort, TranslationPort};
use iv_core::tour::StepDraft;
use iv_core::TourResult;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use super::{ResolveSteps, StepChange};
use crate::usecases::internal::StepListStore;

const CUSTOM_ID_PREFIX: &str = "custom_";

/// Appends a new step under a generated `custom_<13 hex>` id.
pub struct AddStep {
    resolve: ResolveSteps,
    store: StepListStore,
}

impl AddStep {
    pub fn new(
        config_store: Arc<dyn ConfigStorePort>,
        translations: Arc<dyn TranslationPort>,
    ) -> Self {
        Self {
            resolve: ResolveSteps::new(config_store.clone(), translations),
            store: StepListStore::new(config_store),
        }
    }

    pub async fn execute(&self, language: &str, draft: StepDraft) -> TourResult<StepChange> {
        let span = info_span!("usecase.add_step.execute", language = %language);

        async {
            let language = self.resolve.resolve_write_language(language)?;
            let mut resolved = self.resolve.resolve_or_initialize(language).await?;

            let id = loop {
                let candidate = generate_custom_id();
                if !resolved.steps.iter().any(|s| s.id == candidate) {
                    break candidate;
                }
            };
            let step = draft.into_step_with_id(id)?;

            resolved.steps.push(step.clone());
            self.store.save(&resolved.language.resolved, &resolved.steps).await?;

            info!(
                language = %resolved.language.resolved,
                step_id = %step.id,
                total = resolved.steps.len(),
                "step added"
            );
            Ok(StepChange {
                language: resolved.language,
                step,
            })
        }
        .instrument(span)
        .await
    }
}

fn generate_custom_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{CUSTOM_ID_PREFIX}{}", &hex[..13])
}
