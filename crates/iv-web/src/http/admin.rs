//! Admin routes: unfiltered step lists, global settings, listings, telemetry.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use iv_core::settings::GlobalSettingsPatch;
use serde_json::{json, Value};
use tracing::{info_span, Instrument};

use super::caller::{AdminCaller, RequestLanguage};
use super::dto::{
    pick_language, ApiOk, ImportRequest, LanguagePayload, LanguageRequest, SaveStepsRequest,
    StepPayload, StepRequest, StepsPayload, TelemetryToggleRequest,
};
use super::error::ApiError;
use crate::bootstrap::AppRuntime;

type Runtime = State<Arc<AppRuntime>>;
type ApiResult<T> = Result<Json<ApiOk<T>>, ApiError>;

pub async fn get_steps(
    State(runtime): Runtime,
    admin: AdminCaller,
    RequestLanguage(language): RequestLanguage,
) -> ApiResult<StepsPayload> {
    let span = info_span!("http.admin.get_steps", user_id = %admin.user_id, language = %language);
    async {
        let resolved = runtime
            .usecases()
            .resolve_steps()
            .execute_for_admin(&language)
            .await?;
        Ok(Json(ApiOk::new("Steps loaded", resolved.into())))
    }
    .instrument(span)
    .await
}

pub async fn save_steps(
    State(runtime): Runtime,
    admin: AdminCaller,
    RequestLanguage(language): RequestLanguage,
    payload: Result<Json<SaveStepsRequest>, JsonRejection>,
) -> ApiResult<StepsPayload> {
    let Json(request) = payload?;
    let language = pick_language(request.language, language);
    let span = info_span!("http.admin.save_steps", user_id = %admin.user_id, language = %language);
    async {
        let change = runtime
            .usecases()
            .save_steps()
            .execute(&language, request.steps)
            .await?;
        Ok(Json(ApiOk::new("Steps saved successfully", change.into())))
    }
    .instrument(span)
    .await
}

pub async fn add_step(
    State(runtime): Runtime,
    admin: AdminCaller,
    RequestLanguage(language): RequestLanguage,
    payload: Result<Json<StepRequest>, JsonRejection>,
) -> ApiResult<StepPayload> {
    let Json(request) = payload?;
    let language = pick_language(request.language, language);
    let span = info_span!("http.admin.add_step", user_id = %admin.user_id, language = %language);
    async {
        let change = runtime
            .usecases()
            .add_step()
            .execute(&language, request.step)
            .await?;
        Ok(Json(ApiOk::new("Step added successfully", change.into())))
    }
    .instrument(span)
    .await
}

pub async fn update_step(
    State(runtime): Runtime,
    admin: AdminCaller,
    Path(id): Path<String>,
    RequestLanguage(language): RequestLanguage,
    payload: Result<Json<StepRequest>, JsonRejection>,
) -> ApiResult<StepPayload> {
    let Json(request) = payload?;
    let language = pick_language(request.language, language);
    let span = info_span!(
        "http.admin.update_step",
        user_id = %admin.user_id,
        language = %language,
        step_id = %id
    );
    async {
        let change = runtime
            .usecases()
            .update_step()
            .execute(&language, &id, request.step)
            .await?;
        Ok(Json(ApiOk::new("Step updated successfully", change.into())))
    }
    .instrument(span)
    .await
}

pub async fn delete_step(
    State(runtime): Runtime,
    admin: AdminCaller,
    Path(id): Path<String>,
    RequestLanguage(language): RequestLanguage,
) -> ApiResult<Value> {
    let span = info_span!(
        "http.admin.delete_step",
        user_id = %admin.user_id,
        language = %language,
        step_id = %id
    );
    async {
        let removal = runtime
            .usecases()
            .delete_step()
            .execute(&language, &id)
            .await?;
        let language = LanguagePayload::from(&removal.language);
        Ok(Json(ApiOk::new(
            "Step deleted successfully",
            json!({
                "removed": removal.removed,
                "language": language.language,
                "requestedLanguage": language.requested_language,
                "languageFallback": language.language_fallback,
            }),
        )))
    }
    .instrument(span)
    .await
}

pub async fn reset_steps(
    State(runtime): Runtime,
    admin: AdminCaller,
    RequestLanguage(language): RequestLanguage,
    payload: Result<Option<Json<LanguageRequest>>, JsonRejection>,
) -> ApiResult<StepsPayload> {
    let request = payload?.map(|Json(r)| r).unwrap_or_default();
    let language = pick_language(request.language, language);
    let span = info_span!("http.admin.reset_steps", user_id = %admin.user_id, language = %language);
    async {
        let change = runtime.usecases().reset_steps().execute(&language).await?;
        Ok(Json(ApiOk::new("Steps reset to default", change.into())))
    }
    .instrument(span)
    .await
}

pub async fn export_steps(
    State(runtime): Runtime,
    admin: AdminCaller,
    RequestLanguage(language): RequestLanguage,
    payload: Result<Option<Json<LanguageRequest>>, JsonRejection>,
) -> ApiResult<Value> {
    let request = payload?.map(|Json(r)| r).unwrap_or_default();
    let language = pick_language(request.language, language);
    let span = info_span!("http.admin.export_steps", user_id = %admin.user_id, language = %language);
    async {
        let document = runtime.usecases().export_steps().execute(&language).await?;
        Ok(Json(ApiOk::new("Steps exported", json!({ "export": document }))))
    }
    .instrument(span)
    .await
}

pub async fn import_steps(
    State(runtime): Runtime,
    admin: AdminCaller,
    RequestLanguage(language): RequestLanguage,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> ApiResult<StepsPayload> {
    let Json(request) = payload?;
    let language = pick_language(request.language, language);
    let span = info_span!("http.admin.import_steps", user_id = %admin.user_id, language = %language);
    async {
        let change = runtime
            .usecases()
            .import_steps()
            .execute(&language, &request.document)
            .await?;
        Ok(Json(ApiOk::new("Steps imported successfully", change.into())))
    }
    .instrument(span)
    .await
}

pub async fn get_settings(State(runtime): Runtime, admin: AdminCaller) -> ApiResult<Value> {
    let span = info_span!("http.admin.get_settings", user_id = %admin.user_id);
    async {
        let settings = runtime.usecases().get_global_settings().execute().await?;
        Ok(Json(ApiOk::new("Settings loaded", json!(settings))))
    }
    .instrument(span)
    .await
}

pub async fn save_settings(
    State(runtime): Runtime,
    admin: AdminCaller,
    payload: Result<Json<GlobalSettingsPatch>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(patch) = payload?;
    let span = info_span!("http.admin.save_settings", user_id = %admin.user_id);
    async {
        let settings = runtime
            .usecases()
            .update_global_settings()
            .execute(patch)
            .await?;
        Ok(Json(ApiOk::new(
            "Settings saved successfully",
            json!(settings),
        )))
    }
    .instrument(span)
    .await
}

pub async fn list_languages(State(runtime): Runtime, admin: AdminCaller) -> ApiResult<Value> {
    let span = info_span!("http.admin.list_languages", user_id = %admin.user_id);
    async {
        let languages = runtime.usecases().list_languages().execute().await?;
        Ok(Json(ApiOk::new("Languages loaded", json!({ "languages": languages }))))
    }
    .instrument(span)
    .await
}

pub async fn list_groups(State(runtime): Runtime, admin: AdminCaller) -> ApiResult<Value> {
    let span = info_span!("http.admin.list_groups", user_id = %admin.user_id);
    async {
        let groups = runtime.usecases().list_groups().execute().await?;
        Ok(Json(ApiOk::new("Groups loaded", json!({ "groups": groups }))))
    }
    .instrument(span)
    .await
}

pub async fn get_telemetry(State(runtime): Runtime, admin: AdminCaller) -> ApiResult<Value> {
    let span = info_span!("http.admin.get_telemetry", user_id = %admin.user_id);
    async {
        let status = runtime.usecases().get_telemetry_status().execute().await?;
        let statistics = runtime.usecases().get_telemetry_statistics().execute().await?;
        Ok(Json(ApiOk::new(
            "Telemetry status loaded",
            json!({
                "enabled": status.enabled,
                "lastReport": status.last_report,
                "telemetryUrl": status.telemetry_url,
                "statistics": statistics,
            }),
        )))
    }
    .instrument(span)
    .await
}

pub async fn set_telemetry(
    State(runtime): Runtime,
    admin: AdminCaller,
    payload: Result<Json<TelemetryToggleRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(request) = payload?;
    let span = info_span!("http.admin.set_telemetry", user_id = %admin.user_id);
    async {
        runtime
            .usecases()
            .set_telemetry_enabled()
            .execute(request.enabled.is_truthy())
            .await?;
        let status = runtime.usecases().get_telemetry_status().execute().await?;
        Ok(Json(ApiOk::new(
            "Telemetry settings saved",
            json!(status),
        )))
    }
    .instrument(span)
    .await
}
