//! End-user side of the tour: what a user sees and what they did with it.

mod steps;
mod tracking;

pub use steps::{GetWizardSteps, WizardSteps};
pub use tracking::{TrackWizardEvent, WizardEvent};
