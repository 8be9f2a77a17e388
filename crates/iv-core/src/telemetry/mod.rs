//! Anonymous usage telemetry
//!
//! The report carries counts and flags only: no user ids, no group names,
//! and the instance URL leaves the process as a SHA-256 hash.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TELEMETRY_URL: &str = "https://licenses.voxcloud.nl/api/telemetry/introvox";

/// Minimum time between two delivery attempts.
pub const TELEMETRY_COOLDOWN_SECS: i64 = 24 * 60 * 60;

/// Usage numbers shown to admins and included in every report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryStatistics {
    pub total_users: u64,
    pub total_groups: u64,
    /// Stored step count per enabled language; 0 when not yet materialized.
    pub total_steps: BTreeMap<String, u64>,
    pub enabled_languages: Vec<String>,
    pub wizard_enabled: bool,
    pub wizard_started_count: u64,
    pub wizard_completed_count: u64,
    pub wizard_skipped_count: u64,
    pub users_started_wizard: u64,
    pub users_completed_wizard: u64,
    pub group_visibility_used: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryReport {
    pub instance_hash: String,
    pub introvox_version: String,
    #[serde(flatten)]
    pub statistics: TelemetryStatistics,
    pub default_language: String,
    pub os_family: String,
    pub is_docker: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryStatus {
    pub enabled: bool,
    /// Unix seconds of the last accepted report.
    pub last_report: Option<i64>,
    pub telemetry_url: String,
}

/// A report is due when no attempt was made within the cooldown.
pub fn is_due(last_attempt: Option<i64>, now_secs: i64) -> bool {
    match last_attempt {
        None => true,
        Some(last) => now_secs - last > TELEMETRY_COOLDOWN_SECS,
    }
}

/// Parses a stored counter; unreadable values count as zero.
pub fn parse_counter(stored: Option<&str>) -> u64 {
    stored.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}
