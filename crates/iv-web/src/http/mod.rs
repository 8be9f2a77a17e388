//! HTTP surface
//!
//! Every JSON response carries `success`; failures add a machine `error`
//! code and a human `message`. Admin routes require membership of the
//! configured admin group.

mod admin;
mod caller;
mod dto;
mod error;
mod personal;
mod wizard;

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::bootstrap::wiring::APP_VERSION;
use crate::bootstrap::AppRuntime;

pub use caller::{AdminCaller, Caller, RequestLanguage, USER_ID_HEADER};
pub use error::ApiError;

pub fn build_router(runtime: Arc<AppRuntime>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/admin/steps", get(admin::get_steps).post(admin::save_steps))
        .route("/admin/step", post(admin::add_step))
        .route(
            "/admin/step/{id}",
            put(admin::update_step).delete(admin::delete_step),
        )
        .route("/admin/reset", post(admin::reset_steps))
        .route("/admin/export", post(admin::export_steps))
        .route("/admin/import", post(admin::import_steps))
        .route(
            "/admin/settings",
            get(admin::get_settings).post(admin::save_settings),
        )
        .route("/admin/languages", get(admin::list_languages))
        .route("/admin/groups", get(admin::list_groups))
        .route(
            "/admin/telemetry",
            get(admin::get_telemetry).post(admin::set_telemetry),
        )
        .route(
            "/personal/settings",
            get(personal::get_settings).post(personal::save_settings),
        )
        .route("/api/steps", get(wizard::get_steps))
        .route("/api/track/{event}", post(wizard::track))
        .with_state(runtime)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": APP_VERSION,
    }))
}
