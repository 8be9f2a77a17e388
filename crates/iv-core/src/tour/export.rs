//! Export document for moving a step list between instances.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{TourError, TourResult};
use crate::language::normalize_language;
use crate::tour::model::{ensure_unique_ids, Step};
use crate::tour::record::{decode_steps, StepRecordMigrator};

pub const EXPORT_FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepExportDocument {
    pub version: String,
    pub language: String,
    pub export_date: String,
    pub steps: Vec<Step>,
}

impl StepExportDocument {
    pub fn new(language: impl Into<String>, steps: Vec<Step>, exported_at: DateTime<Utc>) -> Self {
        Self {
            version: EXPORT_FORMAT_VERSION.to_string(),
            language: language.into(),
            export_date: exported_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            steps,
        }
    }

    /// Validates an uploaded document against the language it is imported into.
    ///
    /// Works on raw JSON so a malformed upload is reported per step. Steps
    /// are read with the stored-record rules, so anything that can be
    /// exported imports back unchanged.
    pub fn parse_import(document: &Value, target_language: &str) -> TourResult<Vec<Step>> {
        let object = document
            .as_object()
            .ok_or_else(|| TourError::validation("Invalid import file: expected a JSON object"))?;

        if let Some(version) = object.get("version") {
            let version = version
                .as_str()
                .ok_or_else(|| TourError::validation("Invalid import file: version must be a string"))?;
            if !is_supported_version(version) {
                return Err(TourError::validation(format!(
                    "Unsupported import version '{version}', expected {EXPORT_FORMAT_VERSION}"
                )));
            }
        }

        let language = object
            .get("language")
            .and_then(Value::as_str)
            .ok_or_else(|| TourError::validation("Invalid import file: language is required"))?;
        if normalize_language(language) != normalize_language(target_language) {
            return Err(TourError::validation(format!(
                "Import file is for language '{language}', not '{target_language}'"
            )));
        }

        let mut items = object
            .get("steps")
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| TourError::validation("Invalid import file: steps array is required"))?;

        StepRecordMigrator::new().migrate(&mut items);

        let steps = decode_steps(&items).map_err(|(index, e)| {
            TourError::validation(format!("Invalid step at index {index}: {e}"))
        })?;

        ensure_unique_ids(&steps)?;
        Ok(steps)
    }
}

fn is_supported_version(version: &str) -> bool {
    let major = version.split('.').next().unwrap_or_default();
    major == "1"
}
