mod global;
mod user;
mod visibility;

pub use global::{GetGlobalSettings, UpdateGlobalSettings};
pub use user::{GetUserPreference, UpdateUserPreference};
pub use visibility::EvaluateVisibility;
