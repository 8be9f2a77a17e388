use serde::{Deserialize, Serialize};

use crate::language::BASE_LANGUAGE;
use crate::settings::flag::{parse_stored_flag, FlagValue};

pub const INITIAL_WIZARD_VERSION: u64 = 1;

/// Admin-owned settings shared by every user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    pub enabled: bool,
    pub enabled_languages: Vec<String>,
    /// Bumped whenever the tour is pushed to every user again.
    pub wizard_version: u64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            enabled_languages: vec![BASE_LANGUAGE.to_string()],
            wizard_version: INITIAL_WIZARD_VERSION,
        }
    }
}

impl GlobalSettings {
    pub fn from_stored(
        enabled: Option<&str>,
        enabled_languages: Option<Vec<String>>,
        wizard_version: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            enabled: parse_stored_flag(enabled, defaults.enabled),
            enabled_languages: enabled_languages.unwrap_or(defaults.enabled_languages),
            wizard_version: parse_version(wizard_version),
        }
    }

    pub fn is_language_enabled(&self, language: &str) -> bool {
        self.enabled_languages.iter().any(|l| l == language)
    }
}

/// Stored versions that do not parse restart from the initial version.
pub fn parse_version(stored: Option<&str>) -> u64 {
    stored
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(INITIAL_WIZARD_VERSION)
}

/// Fields an admin may change; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettingsPatch {
    #[serde(default)]
    pub enabled: Option<FlagValue>,
    #[serde(default)]
    pub enabled_languages: Option<Vec<String>>,
    #[serde(default)]
    pub show_to_all_users: Option<FlagValue>,
}

impl GlobalSettingsPatch {
    pub fn wants_show_to_all(&self) -> bool {
        self.show_to_all_users
            .as_ref()
            .is_some_and(FlagValue::is_truthy)
    }
}

/// Per-user tour state. Timestamps are Unix seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreference {
    #[serde(rename = "wizardDisabledByUser")]
    pub wizard_disabled: bool,
    pub started_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub skipped_at: Option<i64>,
}

impl UserPreference {
    pub fn from_stored(
        wizard_disabled: Option<&str>,
        started_at: Option<&str>,
        completed_at: Option<&str>,
        skipped_at: Option<&str>,
    ) -> Self {
        let timestamp = |raw: Option<&str>| raw.and_then(|v| v.trim().parse::<i64>().ok());
        Self {
            wizard_disabled: parse_stored_flag(wizard_disabled, false),
            started_at: timestamp(started_at),
            completed_at: timestamp(completed_at),
            skipped_at: timestamp(skipped_at),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferencePatch {
    #[serde(default)]
    pub wizard_disabled: Option<FlagValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_values_decode_to_defaults() {
        let settings = GlobalSettings::from_stored(None, None, None);
        assert_eq!(settings, GlobalSettings::default());
        assert!(settings.enabled);
        assert_eq!(settings.enabled_languages, vec!["en".to_string()]);
        assert_eq!(settings.wizard_version, 1);
    }

    #[test]
    fn stored_values_win() {
        let settings = GlobalSettings::from_stored(
            Some("false"),
            Some(vec!["nl".to_string()]),
            Some("7"),
        );
        assert!(!settings.enabled);
        assert!(settings.is_language_enabled("nl"));
        assert!(!settings.is_language_enabled("en"));
        assert_eq!(settings.wizard_version, 7);
    }

    #[test]
    fn unreadable_version_restarts_at_one() {
        assert_eq!(parse_version(Some("abc")), 1);
        assert_eq!(parse_version(Some(" 3 ")), 3);
    }

    #[test]
    fn patch_reads_loose_flags() {
        let patch: GlobalSettingsPatch = serde_json::from_value(json!({
            "enabled": "1",
            "showToAllUsers": 1
        }))
        .unwrap();
        assert!(patch.enabled.unwrap().is_truthy());
        assert!(patch.enabled_languages.is_none());
        assert!(GlobalSettingsPatch::default().show_to_all_users.is_none());
        assert!(serde_json::from_value::<GlobalSettingsPatch>(json!({"showToAllUsers": "true"}))
            .unwrap()
            .wants_show_to_all());
    }

    #[test]
    fn user_preference_serializes_host_field_name() {
        let pref = UserPreference::from_stored(Some("true"), Some("1700000000"), None, Some("x"));
        let value = serde_json::to_value(&pref).unwrap();
        assert_eq!(value["wizardDisabledByUser"], true);
        assert_eq!(value["startedAt"], 1_700_000_000);
        assert!(value["completedAt"].is_null());
        assert!(value["skippedAt"].is_null());
    }
}
