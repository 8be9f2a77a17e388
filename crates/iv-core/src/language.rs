//! Language code handling.
//!
//! Codes are reduced to their base part (`nl_NL` → `nl`) before any lookup,
//! and anything without a translation catalog falls back to [`BASE_LANGUAGE`].

use serde::Serialize;

/// Language whose catalog backs every missing translation.
pub const BASE_LANGUAGE: &str = "en";

/// Lower-cases a code and strips any region suffix.
pub fn normalize_language(code: &str) -> String {
    let lowered = code.trim().to_ascii_lowercase().replace('-', "_");
    match lowered.split_once('_') {
        Some((base, _)) => base.to_string(),
        None => lowered,
    }
}

/// A code is usable when its base part is two or three ASCII letters.
pub fn is_valid_language_code(code: &str) -> bool {
    let normalized = normalize_language(code);
    (2..=3).contains(&normalized.len()) && normalized.chars().all(|c| c.is_ascii_lowercase())
}

/// Human readable name for the languages shipped with catalogs.
pub fn display_name(code: &str) -> &str {
    match code {
        "en" => "English",
        "nl" => "Nederlands",
        "de" => "Deutsch",
        "fr" => "Français",
        "da" => "Dansk",
        "sv" => "Svenska",
        other => other,
    }
}

/// Outcome of matching a requested language against the available catalogs.
///
/// `fallback` is only set when the requested language is unsupported; a
/// supported language with individual untranslated keys is reported separately
/// by the step resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageResolution {
    pub requested: String,
    pub resolved: String,
    pub fallback: bool,
}

impl LanguageResolution {
    pub fn resolve<S: AsRef<str>>(requested: &str, available: &[S]) -> Self {
        let normalized = normalize_language(requested);
        let supported = available.iter().any(|lang| lang.as_ref() == normalized);

        if supported {
            Self {
                requested: requested.to_string(),
                resolved: normalized,
                fallback: false,
            }
        } else {
            Self {
                requested: requested.to_string(),
                resolved: BASE_LANGUAGE.to_string(),
                fallback: normalized != BASE_LANGUAGE,
            }
        }
    }
}
