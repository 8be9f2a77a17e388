//! The set of languages the tour is shown in.

use std::collections::HashSet;

use crate::language::{normalize_language, BASE_LANGUAGE};

/// Normalizes the requested codes and keeps the ones with a catalog.
///
/// Request order is kept and duplicates are dropped. An empty result falls
/// back to the base language.
pub fn sanitize_enabled_languages<S: AsRef<str>>(requested: &[String], available: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let languages: Vec<String> = requested
        .iter()
        .map(|code| normalize_language(code))
        .filter(|code| available.iter().any(|a| a.as_ref() == code))
        .filter(|code| seen.insert(code.clone()))
        .collect();

    if languages.is_empty() {
        vec![BASE_LANGUAGE.to_string()]
    } else {
        languages
    }
}

/// Decodes the stored JSON array; `None` when absent or unreadable.
pub fn parse_enabled_languages(stored: Option<&str>) -> Option<Vec<String>> {
    let raw = stored?;
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(languages) => Some(languages),
        Err(e) => {
            tracing::warn!(error = %e, "stored enabled languages are not a JSON array");
            None
        }
    }
}

/// Stored form of the language set, a JSON array of codes.
pub fn encode_enabled_languages(languages: &[String]) -> String {
    serde_json::Value::from(languages.to_vec()).to_string()
}
