//! # Dependency Injection
//!
//! ## Responsibilities
//!
//! - Create the infra adapters (config store, catalogs, directory, telemetry)
//! - Inject them into [`AppDeps`]
//!
//! ## Prohibited
//!
//! - No business logic
//! - No configuration validation; empty values were resolved in
//!   [`super::defaults`] already
//!
//! > **This is the only place allowed to depend on iv-infra and iv-app at the same time.**

use std::sync::Arc;

use iv_app::{AppDeps, InstanceInfo};
use iv_core::ports::TranslationPort;
use iv_core::AppConfig;
use iv_infra::environment::{is_docker, os_family};
use iv_infra::{
    CatalogTranslationProvider, FileConfigStore, HttpTelemetrySender, StaticUserDirectory,
    SystemClock,
};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Translation catalogs initialization failed: {0}")]
    TranslationsInit(String),

    #[error("Telemetry client initialization failed: {0}")]
    TelemetryInit(String),
}

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Built-in catalogs, overlaid by any `<lang>.json` in the configured dir.
async fn create_translations(config: &AppConfig) -> WiringResult<CatalogTranslationProvider> {
    CatalogTranslationProvider::builtin()
        .map_err(|e| WiringError::TranslationsInit(format!("{e:#}")))?
        .with_catalog_dir(&config.catalog_dir)
        .await
        .map_err(|e| WiringError::TranslationsInit(format!("{e:#}")))
}

fn instance_info(config: &AppConfig) -> InstanceInfo {
    InstanceInfo {
        app_version: APP_VERSION.to_string(),
        instance_url: config.instance_url.clone(),
        telemetry_url: config.telemetry_url.clone(),
        default_language: config.default_language.clone(),
        os_family: os_family(),
        is_docker: is_docker(),
    }
}

/// Wire all dependencies together.
///
/// The config store file is not touched here; it is created on first write.
pub async fn wire_dependencies(config: &AppConfig) -> WiringResult<AppDeps> {
    let translations = create_translations(config).await?;
    tracing::info!(
        languages = ?translations.available_languages(),
        "translation catalogs loaded"
    );

    let telemetry_sender = HttpTelemetrySender::new(APP_VERSION)
        .map_err(|e| WiringError::TelemetryInit(format!("{e:#}")))?;

    Ok(AppDeps {
        // Storage
        config_store: Arc::new(FileConfigStore::new(config.config_store_path.clone())),

        // Host platform
        translations: Arc::new(translations),
        user_directory: Arc::new(StaticUserDirectory::new(config.users.clone())),

        // Telemetry
        telemetry_sender: Arc::new(telemetry_sender),
        instance: instance_info(config),

        // System
        clock: Arc::new(SystemClock),
    })
}
