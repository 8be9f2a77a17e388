use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use iv_core::settings::UserPreferencePatch;
use iv_core::UserPreference;
use tracing::{info_span, Instrument};

use super::caller::Caller;
use super::dto::ApiOk;
use super::error::ApiError;
use crate::bootstrap::AppRuntime;

pub async fn get_settings(
    State(runtime): State<Arc<AppRuntime>>,
    caller: Caller,
) -> Result<Json<ApiOk<UserPreference>>, ApiError> {
    let span = info_span!("http.personal.get_settings", user_id = %caller.user_id);
    async {
        let preference = runtime
            .usecases()
            .get_user_preference()
            .execute(&caller.user_id)
            .await?;
        Ok(Json(ApiOk::new("Settings loaded", preference)))
    }
    .instrument(span)
    .await
}

pub async fn save_settings(
    State(runtime): State<Arc<AppRuntime>>,
    caller: Caller,
    payload: Result<Json<UserPreferencePatch>, JsonRejection>,
) -> Result<Json<ApiOk<UserPreference>>, ApiError> {
    let Json(patch) = payload?;
    let span = info_span!("http.personal.save_settings", user_id = %caller.user_id);
    async {
        let preference = runtime
            .usecases()
            .update_user_preference()
            .execute(&caller.user_id, patch)
            .await?;
        Ok(Json(ApiOk::new("Settings saved successfully", preference)))
    }
    .instrument(span)
    .await
}
