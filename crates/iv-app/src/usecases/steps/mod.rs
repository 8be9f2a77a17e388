//! Admin operations on the per-language step lists
//!
//! Every mutation starts from the resolved list, so a language that was
//! never read is materialized before it is changed. Lists are written back
//! whole.

mod add;
mod delete;
mod export;
mod import;
mod reset;
mod resolve;
mod save;
mod update;

pub use add::AddStep;
pub use delete::DeleteStep;
pub use export::ExportSteps;
pub use import::ImportSteps;
pub use reset::ResetSteps;
pub use resolve::{ResolveSteps, ResolvedSteps};
pub use save::SaveSteps;
pub use update::UpdateStep;

use iv_core::tour::Step;
use iv_core::LanguageResolution;

/// A single step after it was added or updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepChange {
    pub language: LanguageResolution,
    pub step: Step,
}

/// A whole list after it was replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepListChange {
    pub language: LanguageResolution,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRemoval {
    pub language: LanguageResolution,
    pub removed: usize,
}
