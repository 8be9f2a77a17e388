//! Config store keys.
//!
//! App-scoped keys are shared by every user; user-scoped keys live under a
//! user id. Values are always strings.

pub const STEPS_KEY_PREFIX: &str = "wizard_steps_";

// App scope
pub const WIZARD_ENABLED: &str = "wizard_enabled";
pub const ENABLED_LANGUAGES: &str = "enabled_languages";
pub const WIZARD_VERSION: &str = "wizard_version";
pub const WIZARD_STARTED_COUNT: &str = "wizard_started_count";
pub const WIZARD_COMPLETED_COUNT: &str = "wizard_completed_count";
pub const WIZARD_SKIPPED_COUNT: &str = "wizard_skipped_count";
pub const TELEMETRY_ENABLED: &str = "telemetry_enabled";
pub const TELEMETRY_URL: &str = "telemetry_url";
pub const TELEMETRY_LAST_REPORT: &str = "telemetry_last_report";
pub const TELEMETRY_LAST_ATTEMPT: &str = "telemetry_last_attempt";

// User scope
pub const WIZARD_DISABLED: &str = "wizard_disabled";
pub const WIZARD_STARTED: &str = "wizard_started";
pub const WIZARD_COMPLETED: &str = "wizard_completed";
pub const WIZARD_SKIPPED: &str = "wizard_skipped";

/// Key of the stored step list for one language.
pub fn steps_key(language: &str) -> String {
    format!("{STEPS_KEY_PREFIX}{language}")
}
