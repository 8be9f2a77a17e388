//! # Application Runtime
//!
//! [`AppRuntime`] owns the wired [`AppDeps`] and hands out use cases through
//! [`UseCases`]. Handlers never see a port directly.
//!
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use iv_web::bootstrap::AppRuntime;
//! # async fn example(runtime: Arc<AppRuntime>) -> Result<(), iv_core::TourError> {
//! let settings = runtime.usecases().get_global_settings().execute().await?;
//! # Ok(())
//! # }
//! ```

use iv_app::usecases::*;
use iv_app::AppDeps;

pub struct AppRuntime {
    /// Application dependencies
    pub deps: AppDeps,
    /// Members of this group may call the admin routes
    admin_group: String,
}

impl AppRuntime {
    pub fn new(deps: AppDeps, admin_group: impl Into<String>) -> Self {
        Self {
            deps,
            admin_group: admin_group.into(),
        }
    }

    pub fn admin_group(&self) -> &str {
        &self.admin_group
    }

    pub fn default_language(&self) -> &str {
        &self.deps.instance.default_language
    }

    pub fn usecases(&self) -> UseCases<'_> {
        UseCases::new(self)
    }
}

/// Use case accessor for AppRuntime.
///
/// Each method returns a use case wired from `AppDeps`; all port-to-use-case
/// wiring lives here.
pub struct UseCases<'a> {
    runtime: &'a AppRuntime,
}

impl<'a> UseCases<'a> {
    pub fn new(runtime: &'a AppRuntime) -> Self {
        Self { runtime }
    }

    fn deps(&self) -> &AppDeps {
        &self.runtime.deps
    }

    // Steps

    pub fn resolve_steps(&self) -> ResolveSteps {
        ResolveSteps::new(self.deps().config_store.clone(), self.deps().translations.clone())
    }

    pub fn save_steps(&self) -> SaveSteps {
        SaveSteps::new(self.deps().config_store.clone(), self.deps().translations.clone())
    }

    pub fn add_step(&self) -> AddStep {
        AddStep::new(self.deps().config_store.clone(), self.deps().translations.clone())
    }

    pub fn update_step(&self) -> UpdateStep {
        UpdateStep::new(self.deps().config_store.clone(), self.deps().translations.clone())
    }

    pub fn delete_step(&self) -> DeleteStep {
        DeleteStep::new(self.deps().config_store.clone(), self.deps().translations.clone())
    }

    pub fn reset_steps(&self) -> ResetSteps {
        ResetSteps::new(self.deps().config_store.clone(), self.deps().translations.clone())
    }

    pub fn export_steps(&self) -> ExportSteps {
        ExportSteps::new(
            self.deps().config_store.clone(),
            self.deps().translations.clone(),
            self.deps().clock.clone(),
        )
    }

    pub fn import_steps(&self) -> ImportSteps {
        ImportSteps::new(self.deps().config_store.clone(), self.deps().translations.clone())
    }

    // Settings

    pub fn get_global_settings(&self) -> GetGlobalSettings {
        GetGlobalSettings::new(self.deps().config_store.clone())
    }

    pub fn update_global_settings(&self) -> UpdateGlobalSettings {
        UpdateGlobalSettings::new(
            self.deps().config_store.clone(),
            self.deps().translations.clone(),
            self.deps().user_directory.clone(),
        )
    }

    pub fn get_user_preference(&self) -> GetUserPreference {
        GetUserPreference::new(self.deps().config_store.clone())
    }

    pub fn update_user_preference(&self) -> UpdateUserPreference {
        UpdateUserPreference::new(self.deps().config_store.clone())
    }

    // End-user tour

    pub fn get_wizard_steps(&self) -> GetWizardSteps {
        GetWizardSteps::new(
            self.deps().config_store.clone(),
            self.deps().translations.clone(),
            self.deps().user_directory.clone(),
        )
    }

    pub fn track_wizard_event(&self) -> TrackWizardEvent {
        TrackWizardEvent::new(self.deps().config_store.clone(), self.deps().clock.clone())
    }

    // Listings

    pub fn list_languages(&self) -> ListLanguages {
        ListLanguages::new(self.deps().config_store.clone(), self.deps().translations.clone())
    }

    pub fn list_groups(&self) -> ListGroups {
        ListGroups::new(self.deps().user_directory.clone())
    }

    // Telemetry

    pub fn get_telemetry_status(&self) -> GetTelemetryStatus {
        GetTelemetryStatus::new(
            self.deps().config_store.clone(),
            self.deps().instance.telemetry_url.clone(),
        )
    }

    pub fn get_telemetry_statistics(&self) -> GetTelemetryStatistics {
        GetTelemetryStatistics::new(
            self.deps().config_store.clone(),
            self.deps().user_directory.clone(),
        )
    }

    pub fn set_telemetry_enabled(&self) -> SetTelemetryEnabled {
        SetTelemetryEnabled::new(self.deps().config_store.clone())
    }

    pub fn send_telemetry_if_due(&self) -> SendTelemetryIfDue {
        SendTelemetryIfDue::new(
            self.deps().config_store.clone(),
            self.deps().user_directory.clone(),
            self.deps().telemetry_sender.clone(),
            self.deps().clock.clone(),
            self.deps().instance.clone(),
        )
    }
}
