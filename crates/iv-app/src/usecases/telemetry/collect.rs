use std::sync::Arc;

use iv_core::keys::{
    WIZARD_COMPLETED, WIZARD_COMPLETED_COUNT, WIZARD_SKIPPED_COUNT, WIZARD_STARTED,
    WIZARD_STARTED_COUNT,
};
use iv_core::ports::{ConfigStorePort, UserDirectoryPort};
use iv_core::telemetry::{parse_counter, TelemetryReport, TelemetryStatistics};
use iv_core::TourResult;
use sha2::{Digest, Sha256};
use tracing::{debug, info_span, warn, Instrument};

use crate::deps::InstanceInfo;
use crate::usecases::internal::StepListStore;
use crate::usecases::settings::GetGlobalSettings;

/// Usage numbers for the admin page.
///
/// Directory and record failures degrade to zero so one broken language or
/// an unreachable directory never hides the rest of the numbers.
pub struct GetTelemetryStatistics {
    config_store: Arc<dyn ConfigStorePort>,
    user_directory: Arc<dyn UserDirectoryPort>,
}

impl GetTelemetryStatistics {
    pub fn new(
        config_store: Arc<dyn ConfigStorePort>,
        user_directory: Arc<dyn UserDirectoryPort>,
    ) -> Self {
        Self {
            config_store,
            user_directory,
        }
    }

    pub async fn execute(&self) -> TourResult<TelemetryStatistics> {
        let span = info_span!("usecase.get_telemetry_statistics.execute");

        async {
            let settings = GetGlobalSettings::new(self.config_store.clone()).read().await?;
            let store = StepListStore::new(self.config_store.clone());

            let mut stats = TelemetryStatistics {
                enabled_languages: settings.enabled_languages.clone(),
                wizard_enabled: settings.enabled,
                ..Default::default()
            };

            stats.total_users = match self.user_directory.list_user_ids().await {
                Ok(users) => users.len() as u64,
                Err(e) => {
                    warn!(error = %e, "failed to count users");
                    0
                }
            };
            stats.total_groups = match self.user_directory.list_groups().await {
                Ok(groups) => groups.len() as u64,
                Err(e) => {
                    warn!(error = %e, "failed to count groups");
                    0
                }
            };

            for language in &settings.enabled_languages {
                let steps = match store.load(language).await {
                    Ok(Some(record)) => record.steps,
                    Ok(None) => Vec::new(),
                    Err(e) => {
                        warn!(language = %language, error = %e, "skipping unreadable step list");
                        Vec::new()
                    }
                };
                if steps.iter().any(|s| !s.visible_to_groups.is_empty()) {
                    stats.group_visibility_used = true;
                }
                stats.total_steps.insert(language.clone(), steps.len() as u64);
            }

            stats.wizard_started_count = self.counter(WIZARD_STARTED_COUNT).await?;
            stats.wizard_completed_count = self.counter(WIZARD_COMPLETED_COUNT).await?;
            stats.wizard_skipped_count = self.counter(WIZARD_SKIPPED_COUNT).await?;
            stats.users_started_wizard =
                self.config_store.users_with_value(WIZARD_STARTED).await?.len() as u64;
            stats.users_completed_wizard =
                self.config_store.users_with_value(WIZARD_COMPLETED).await?.len() as u64;

            Ok(stats)
        }
        .instrument(span)
        .await
    }

    async fn counter(&self, key: &str) -> TourResult<u64> {
        Ok(parse_counter(self.config_store.get_app_value(key).await?.as_deref()))
    }
}

/// Builds the anonymous report sent to the telemetry endpoint.
pub struct CollectTelemetry {
    statistics: GetTelemetryStatistics,
    instance: InstanceInfo,
}

impl CollectTelemetry {
    pub fn new(
        config_store: Arc<dyn ConfigStorePort>,
        user_directory: Arc<dyn UserDirectoryPort>,
        instance: InstanceInfo,
    ) -> Self {
        Self {
            statistics: GetTelemetryStatistics::new(config_store, user_directory),
            instance,
        }
    }

    pub async fn execute(&self) -> TourResult<TelemetryReport> {
        let span = info_span!("usecase.collect_telemetry.execute");

        async {
            let statistics = self.statistics.execute().await?;
            debug!(total_users = statistics.total_users, "telemetry collected");

            Ok(TelemetryReport {
                instance_hash: instance_hash(&self.instance.instance_url),
                introvox_version: self.instance.app_version.clone(),
                statistics,
                default_language: self.instance.default_language.clone(),
                os_family: self.instance.os_family.clone(),
                is_docker: self.instance.is_docker,
            })
        }
        .instrument(span)
        .await
    }
}

fn instance_hash(instance_url: &str) -> String {
    hex::encode(Sha256::digest(instance_url.as_bytes()))
}
