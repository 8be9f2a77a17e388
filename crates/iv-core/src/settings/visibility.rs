//! Whether a user sees the tour at all.

use serde::Serialize;

use crate::settings::model::{GlobalSettings, UserPreference};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenReason {
    GloballyDisabled,
    LanguageDisabled,
    UserOptedOut,
}

/// Composite of the global switch, the language set and the user opt-out.
///
/// The first failing predicate, in that order, is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveVisibility {
    pub visible: bool,
    pub reason: Option<HiddenReason>,
}

impl EffectiveVisibility {
    pub fn evaluate(settings: &GlobalSettings, language: &str, preference: &UserPreference) -> Self {
        let reason = if !settings.enabled {
            Some(HiddenReason::GloballyDisabled)
        } else if !settings.is_language_enabled(language) {
            Some(HiddenReason::LanguageDisabled)
        } else if preference.wizard_disabled {
            Some(HiddenReason::UserOptedOut)
        } else {
            None
        };

        Self {
            visible: reason.is_none(),
            reason,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(enabled: bool, languages: &[&str]) -> GlobalSettings {
        GlobalSettings {
            enabled,
            enabled_languages: languages.iter().map(|l| l.to_string()).collect(),
            wizard_version: 1,
        }
    }

    fn opted_out(disabled: bool) -> UserPreference {
        UserPreference {
            wizard_disabled: disabled,
            ..Default::default()
        }
    }

    #[test]
    fn visible_when_all_predicates_pass() {
        let decision = EffectiveVisibility::evaluate(&settings(true, &["en", "nl"]), "nl", &opted_out(false));
        assert!(decision.is_visible());
        assert_eq!(decision.reason, None);
    }

    #[test]
    fn reports_first_failing_predicate() {
        let decision = EffectiveVisibility::evaluate(&settings(false, &["en"]), "de", &opted_out(true));
        assert_eq!(decision.reason, Some(HiddenReason::GloballyDisabled));

        let decision = EffectiveVisibility::evaluate(&settings(true, &["en"]), "de", &opted_out(true));
        assert_eq!(decision.reason, Some(HiddenReason::LanguageDisabled));

        let decision = EffectiveVisibility::evaluate(&settings(true, &["de"]), "de", &opted_out(true));
        assert_eq!(decision.reason, Some(HiddenReason::UserOptedOut));
        assert!(!decision.is_visible());
    }

    #[test]
    fn reason_serializes_in_snake_case() {
        let decision = EffectiveVisibility::evaluate(&settings(true, &["en"]), "nl", &opted_out(false));
        let value = serde_json::to_value(decision).unwrap();
        assert_eq!(value["reason"], "language_disabled");
        assert_eq!(value["visible"], false);
    }
}
