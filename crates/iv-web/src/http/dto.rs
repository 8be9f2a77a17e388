//! Request bodies and response payloads.
//!
//! Responses are flattened into `{"success": true, ...}` by [`ApiOk`].

use iv_app::usecases::{ResolvedSteps, StepChange, StepListChange, WizardSteps};
use iv_core::settings::{FlagValue, HiddenReason};
use iv_core::{LanguageResolution, Step, StepDraft};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct ApiOk<T: Serialize> {
    pub success: bool,
    pub message: &'static str,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiOk<T> {
    pub fn new(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message,
            data,
        }
    }
}

// Requests

#[derive(Debug, Deserialize)]
pub struct SaveStepsRequest {
    #[serde(default)]
    pub language: Option<String>,
    pub steps: Vec<StepDraft>,
}

#[derive(Debug, Deserialize)]
pub struct StepRequest {
    #[serde(default)]
    pub language: Option<String>,
    pub step: StepDraft,
}

#[derive(Debug, Default, Deserialize)]
pub struct LanguageRequest {
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    #[serde(default)]
    pub language: Option<String>,
    pub document: Value,
}

#[derive(Debug, Deserialize)]
pub struct TelemetryToggleRequest {
    pub enabled: FlagValue,
}

/// Body language wins over the request language.
pub fn pick_language(body: Option<String>, request: String) -> String {
    body.filter(|l| !l.trim().is_empty()).unwrap_or(request)
}

// Responses

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePayload {
    pub language: String,
    pub requested_language: String,
    pub language_fallback: bool,
}

impl From<&LanguageResolution> for LanguagePayload {
    fn from(resolution: &LanguageResolution) -> Self {
        Self {
            language: resolution.resolved.clone(),
            requested_language: resolution.requested.clone(),
            language_fallback: resolution.fallback,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepsPayload {
    pub steps: Vec<Step>,
    #[serde(flatten)]
    pub language: LanguagePayload,
    pub missing_translations: Vec<String>,
}

impl From<ResolvedSteps> for StepsPayload {
    fn from(resolved: ResolvedSteps) -> Self {
        Self {
            language: (&resolved.language).into(),
            steps: resolved.steps,
            missing_translations: resolved.missing_translations,
        }
    }
}

impl From<StepListChange> for StepsPayload {
    fn from(change: StepListChange) -> Self {
        Self {
            language: (&change.language).into(),
            steps: change.steps,
            missing_translations: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StepPayload {
    pub step: Step,
    #[serde(flatten)]
    pub language: LanguagePayload,
}

impl From<StepChange> for StepPayload {
    fn from(change: StepChange) -> Self {
        Self {
            language: (&change.language).into(),
            step: change.step,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardPayload {
    /// Whether the tour should be shown at all.
    pub enabled: bool,
    pub reason: Option<HiddenReason>,
    pub steps: Vec<Step>,
    pub wizard_version: u64,
    #[serde(flatten)]
    pub language: LanguagePayload,
    pub missing_translations: Vec<String>,
}

impl From<WizardSteps> for WizardPayload {
    fn from(wizard: WizardSteps) -> Self {
        Self {
            enabled: wizard.visibility.visible,
            reason: wizard.visibility.reason,
            language: (&wizard.language).into(),
            steps: wizard.steps,
            wizard_version: wizard.wizard_version,
            missing_translations: wizard.missing_translations,
        }
    }
}
