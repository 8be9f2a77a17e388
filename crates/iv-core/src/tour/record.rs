//! Stored step records
//!
//! A record is the JSON text kept under `wizard_steps_<lang>`. Older records
//! predate some step fields, so decoding runs every step object through the
//! registered migrations first and hands back the rewritten text when any of
//! them changed something. Unknown fields survive the rewrite.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{TourError, TourResult};
use crate::tour::model::Step;

/// One in-place upgrade of a stored step object.
pub trait StepRecordMigration: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns true when the object was modified.
    fn migrate(&self, step: &mut Map<String, Value>) -> bool;
}

/// Steps written before the per-step toggle existed are enabled.
pub struct EnabledFlagMigration;

impl StepRecordMigration for EnabledFlagMigration {
    fn name(&self) -> &'static str {
        "enabled_flag"
    }

    fn migrate(&self, step: &mut Map<String, Value>) -> bool {
        match step.get("enabled") {
            Some(Value::Null) | None => {
                step.insert("enabled".to_string(), Value::Bool(true));
                true
            }
            Some(_) => false,
        }
    }
}

pub struct StepRecordMigrator {
    migrations: Vec<Box<dyn StepRecordMigration>>,
}

impl StepRecordMigrator {
    pub fn new() -> Self {
        Self {
            migrations: vec![Box::new(EnabledFlagMigration)],
        }
    }

    /// Applies every migration to every step object; non-objects are left alone.
    pub fn migrate(&self, steps: &mut [Value]) -> bool {
        let mut changed = false;
        for step in steps.iter_mut() {
            let Some(object) = step.as_object_mut() else {
                continue;
            };
            for migration in &self.migrations {
                if migration.migrate(object) {
                    tracing::trace!(migration = migration.name(), "step record migrated");
                    changed = true;
                }
            }
        }
        changed
    }
}

impl Default for StepRecordMigrator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord {
    pub steps: Vec<Step>,
    /// New record text when a migration changed the stored form.
    pub rewritten: Option<String>,
}

pub fn decode_record(language: &str, raw: &str) -> TourResult<DecodedRecord> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| TourError::corrupt(language, e))?;
    let Value::Array(mut items) = value else {
        return Err(TourError::corrupt(language, "expected a JSON array"));
    };

    if let Some(index) = items.iter().position(|item| !item.is_object()) {
        return Err(TourError::corrupt(
            language,
            format!("step at index {index} is not an object"),
        ));
    }

    let changed = StepRecordMigrator::new().migrate(&mut items);

    let steps = decode_steps(&items)
        .map_err(|(index, e)| TourError::corrupt(language, format!("step at index {index}: {e}")))?;

    let rewritten = if changed {
        tracing::debug!(language, steps = steps.len(), "stored steps need rewrite");
        Some(serde_json::to_string(&items).map_err(|e| TourError::corrupt(language, e))?)
    } else {
        None
    };

    Ok(DecodedRecord { steps, rewritten })
}

/// Decodes already migrated step objects, stopping at the first bad index.
///
/// Stored records and import files share this shape, so whatever a record
/// holds can be exported and imported back unchanged.
pub fn decode_steps(items: &[Value]) -> Result<Vec<Step>, (usize, serde_json::Error)> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| Step::deserialize(item).map_err(|e| (index, e)))
        .collect()
}

pub fn encode_steps(steps: &[Step]) -> TourResult<String> {
    serde_json::to_string(steps)
        .map_err(|e| TourError::validation(format!("steps cannot be encoded: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_without_enabled_is_migrated_and_keeps_unknown_fields() {
        let raw = json!([
            {"id": "welcome", "title": "Hi", "text": "", "attachTo": "", "position": "right", "legacy": 7},
            {"id": "files", "title": "Files", "enabled": false}
        ])
        .to_string();

        let decoded = decode_record("en", &raw).unwrap();
        assert!(decoded.steps[0].enabled);
        assert!(!decoded.steps[1].enabled);

        let rewritten: Value = serde_json::from_str(decoded.rewritten.as_deref().unwrap()).unwrap();
        assert_eq!(rewritten[0]["enabled"], true);
        assert_eq!(rewritten[0]["legacy"], 7);
        assert_eq!(rewritten[1]["enabled"], false);
    }

    #[test]
    fn migrated_record_decodes_without_rewrite() {
        let raw = json!([{"id": "a", "title": "A", "enabled": true}]).to_string();
        let first = decode_record("en", &raw).unwrap();
        assert!(first.rewritten.is_none());
        assert_eq!(first.steps.len(), 1);
    }

    #[test]
    fn null_enabled_counts_as_missing() {
        let raw = json!([{"id": "a", "title": "A", "enabled": null}]).to_string();
        let decoded = decode_record("en", &raw).unwrap();
        assert!(decoded.steps[0].enabled);
        assert!(decoded.rewritten.is_some());
    }

    #[test]
    fn malformed_json_is_corrupt() {
        let err = decode_record("de", "{not json").unwrap_err();
        assert!(matches!(err, TourError::CorruptRecord { ref language, .. } if language == "de"));
    }

    #[test]
    fn non_array_and_non_object_items_are_corrupt() {
        assert!(decode_record("en", r#"{"id":"a"}"#).is_err());
        assert!(decode_record("en", r#"[1, 2]"#).is_err());
        assert!(decode_record("en", r#"[{"title": "no id", "enabled": true}]"#).is_err());
    }

    #[test]
    fn empty_array_is_a_valid_record() {
        let decoded = decode_record("en", "[]").unwrap();
        assert!(decoded.steps.is_empty());
        assert!(decoded.rewritten.is_none());
    }
}
