use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{TourError, TourResult};

/// Where the tour card sits relative to its anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepPosition {
    Top,
    #[default]
    Right,
    Bottom,
    Left,
}

/// One card of the guided tour.
///
/// An empty `attach_to` shows the card centered. An empty
/// `visible_to_groups` makes the step visible to everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attach_to: String,
    #[serde(default)]
    pub position: StepPosition,
    pub enabled: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub visible_to_groups: Vec<String>,
}

/// Step as submitted by an editor; every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub attach_to: Option<String>,
    #[serde(default)]
    pub position: Option<StepPosition>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub visible_to_groups: Vec<String>,
}

impl StepDraft {
    /// Builds a step under the given id, ignoring any id in the draft.
    ///
    /// Only the title is mandatory; `enabled` defaults to true.
    pub fn into_step_with_id(self, id: impl Into<String>) -> TourResult<Step> {
        let title = non_empty(self.title)
            .ok_or_else(|| TourError::validation("Invalid step data: title is required"))?;

        Ok(Step {
            id: id.into(),
            title,
            text: self.text.unwrap_or_default(),
            attach_to: self.attach_to.unwrap_or_default(),
            position: self.position.unwrap_or_default(),
            enabled: self.enabled.unwrap_or(true),
            visible_to_groups: dedup_groups(self.visible_to_groups),
        })
    }

    /// Builds a step that carries its own id, as in a wholesale save.
    pub fn into_step(self) -> TourResult<Step> {
        let id = non_empty(self.id.clone()).ok_or_else(|| {
            TourError::validation("Invalid step data: id and title are required")
        })?;
        if non_empty(self.title.clone()).is_none() {
            return Err(TourError::validation(format!(
                "Invalid step data: id and title are required (step '{id}')"
            )));
        }
        self.into_step_with_id(id)
    }
}

/// Rejects a list in which two steps share an id.
pub fn ensure_unique_ids(steps: &[Step]) -> TourResult<()> {
    let mut seen = HashSet::new();
    for step in steps {
        if !seen.insert(step.id.as_str()) {
            return Err(TourError::validation(format!(
                "Invalid step data: duplicate step id '{}'",
                step.id
            )));
        }
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn dedup_groups(groups: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    groups
        .into_iter()
        .filter(|g| !g.is_empty() && seen.insert(g.clone()))
        .collect()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn step_uses_camel_case_fields() {
        let step = Step {
            id: "files".to_string(),
            title: "Files".to_string(),
            text: "<p>Your files</p>".to_string(),
            attach_to: "[data-id=\"files\"]".to_string(),
            position: StepPosition::Bottom,
            enabled: true,
            visible_to_groups: vec!["staff".to_string()],
        };

        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["attachTo"], "[data-id=\"files\"]");
        assert_eq!(value["position"], "bottom");
        assert_eq!(value["visibleToGroups"], json!(["staff"]));
    }

    #[test]
    fn null_groups_decode_as_empty() {
        let step: Step = serde_json::from_value(json!({
            "id": "a", "title": "A", "enabled": false, "visibleToGroups": null
        }))
        .unwrap();
        assert!(step.visible_to_groups.is_empty());
        assert_eq!(step.position, StepPosition::Right);
    }

    #[test]
    fn draft_requires_title() {
        let draft = StepDraft {
            text: Some("body".to_string()),
            ..Default::default()
        };
        let err = draft.into_step_with_id("custom_1").unwrap_err();
        assert!(matches!(err, TourError::Validation(_)));
    }

    #[test]
    fn draft_ignores_its_own_id_when_one_is_assigned() {
        let draft = StepDraft {
            id: Some("attacker".to_string()),
            title: Some("Title".to_string()),
            ..Default::default()
        };
        let step = draft.into_step_with_id("welcome").unwrap();
        assert_eq!(step.id, "welcome");
        assert!(step.enabled);
    }

    #[test]
    fn draft_without_id_is_rejected_for_wholesale_save() {
        let draft = StepDraft {
            title: Some("Title".to_string()),
            ..Default::default()
        };
        assert!(draft.into_step().is_err());

        let blank_title = StepDraft {
            id: Some("x".to_string()),
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(blank_title.into_step().is_err());
    }

    #[test]
    fn duplicate_groups_are_collapsed() {
        let draft = StepDraft {
            title: Some("T".to_string()),
            visible_to_groups: vec!["a".into(), "b".into(), "a".into(), "".into()],
            ..Default::default()
        };
        let step = draft.into_step_with_id("x").unwrap();
        assert_eq!(step.visible_to_groups, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let step = StepDraft {
            title: Some("T".to_string()),
            ..Default::default()
        }
        .into_step_with_id("same")
        .unwrap();
        assert!(ensure_unique_ids(&[step.clone(), step]).is_err());
    }
}
