//! # iv-core
//!
//! Core domain models and ports for the IntroVox tour service.
//!
//! This crate contains pure business rules without any infrastructure dependencies:
//! step lists and their stored-record migration, language fallback, visibility
//! predicates, settings decoding and the telemetry report shape.

// Public module exports
pub mod config;
pub mod error;
pub mod keys;
pub mod l10n;
pub mod language;
pub mod ports;
pub mod settings;
pub mod telemetry;
pub mod tour;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use error::{TourError, TourResult};
pub use language::{LanguageResolution, BASE_LANGUAGE};
pub use settings::{GlobalSettings, UserPreference};
pub use tour::{Step, StepDraft, StepPosition};
