//! # Application Dependencies
//!
//! This module defines the dependency grouping for use case construction.
//!
//! **Note**: This is NOT a Builder pattern.
//! - No build steps
//! - No default values
//! - No hidden logic
//! - Just parameter grouping

use std::sync::Arc;

use iv_core::ports::*;

/// Facts about this deployment that end up in telemetry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceInfo {
    pub app_version: String,
    pub instance_url: String,
    /// Endpoint used unless an admin stored an override.
    pub telemetry_url: String,
    pub default_language: String,
    pub os_family: String,
    pub is_docker: bool,
}

/// Application dependency grouping (non-Builder, just parameter grouping)
///
/// All dependencies are required - no defaults, no optional fields.
pub struct AppDeps {
    // Storage
    pub config_store: Arc<dyn ConfigStorePort>,

    // Host platform
    pub translations: Arc<dyn TranslationPort>,
    pub user_directory: Arc<dyn UserDirectoryPort>,

    // Telemetry
    pub telemetry_sender: Arc<dyn TelemetrySenderPort>,
    pub instance: InstanceInfo,

    // System
    pub clock: Arc<dyn ClockPort>,
}
