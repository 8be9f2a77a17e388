//! Fallbacks for configuration values the file left empty.
//!
//! This is the only place that decides what an empty config value means.

use std::path::PathBuf;

use iv_core::telemetry::DEFAULT_TELEMETRY_URL;
use iv_core::{AppConfig, BASE_LANGUAGE};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_ADMIN_GROUP: &str = "admin";

/// Fills every empty field; `system_data_dir` backs an empty data dir.
pub fn resolve_defaults(mut config: AppConfig, system_data_dir: PathBuf) -> AppConfig {
    if config.data_dir.as_os_str().is_empty() {
        config.data_dir = system_data_dir;
    }
    let system = AppConfig::with_system_defaults(config.data_dir.clone());

    if config.config_store_path.as_os_str().is_empty() {
        config.config_store_path = system.config_store_path;
    }
    if config.catalog_dir.as_os_str().is_empty() {
        config.catalog_dir = system.catalog_dir;
    }
    fill(&mut config.bind_addr, DEFAULT_BIND_ADDR);
    fill(&mut config.telemetry_url, DEFAULT_TELEMETRY_URL);
    fill(&mut config.default_language, BASE_LANGUAGE);
    fill(&mut config.admin_group, DEFAULT_ADMIN_GROUP);
    config
}

fn fill(value: &mut String, default: &str) {
    if value.trim().is_empty() {
        *value = default.to_string();
    }
}
