//! Business logic use cases
//!
//! Admin paths see every stored step; the end-user path goes through the
//! visibility predicates first.
//!
//! [ResolveSteps]  ← admin reads, every list mutation, end-user reads
//!        ↓
//! [GetWizardSteps] → settings short-circuit → enabled + group filter

mod internal;
pub mod languages;
pub mod settings;
pub mod steps;
pub mod telemetry;
pub mod wizard;

#[cfg(test)]
pub(crate) mod test_support;

pub use languages::{LanguageInfo, ListGroups, ListLanguages};
pub use settings::{
    EvaluateVisibility, GetGlobalSettings, GetUserPreference, UpdateGlobalSettings,
    UpdateUserPreference,
};
pub use steps::{
    AddStep, DeleteStep, ExportSteps, ImportSteps, ResetSteps, ResolveSteps, ResolvedSteps,
    SaveSteps, StepChange, StepListChange, StepRemoval, UpdateStep,
};
pub use telemetry::{
    CollectTelemetry, GetTelemetryStatistics, GetTelemetryStatus, SendTelemetryIfDue,
    SetTelemetryEnabled, TelemetryOutcome,
};
pub use wizard::{GetWizardSteps, TrackWizardEvent, WizardEvent, WizardSteps};
