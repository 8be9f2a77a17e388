//! End-user routes used by the tour renderer.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use iv_app::usecases::WizardEvent;
use serde_json::{json, Value};
use tracing::{info_span, Instrument};

use super::caller::{Caller, RequestLanguage};
use super::dto::{ApiOk, WizardPayload};
use super::error::ApiError;
use crate::bootstrap::AppRuntime;

pub async fn get_steps(
    State(runtime): State<Arc<AppRuntime>>,
    caller: Caller,
    RequestLanguage(language): RequestLanguage,
) -> Result<Json<ApiOk<WizardPayload>>, ApiError> {
    let span = info_span!("http.wizard.get_steps", user_id = %caller.user_id, language = %language);
    async {
        let wizard = runtime
            .usecases()
            .get_wizard_steps()
            .execute(&caller.user_id, &language)
            .await?;
        Ok(Json(ApiOk::new("Steps loaded", wizard.into())))
    }
    .instrument(span)
    .await
}

pub async fn track(
    State(runtime): State<Arc<AppRuntime>>,
    caller: Caller,
    Path(event): Path<String>,
) -> Result<Json<ApiOk<Value>>, ApiError> {
    let span = info_span!("http.wizard.track", user_id = %caller.user_id, event = %event);
    async {
        let event: WizardEvent = event.parse()?;
        let recorded = runtime
            .usecases()
            .track_wizard_event()
            .execute(&caller.user_id, event)
            .await?;
        Ok(Json(ApiOk::new("Event tracked", json!({ "recorded": recorded }))))
    }
    .instrument(span)
    .await
}
