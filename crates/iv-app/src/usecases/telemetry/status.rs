use std::sync::Arc;

use iv_core::keys::{TELEMETRY_ENABLED, TELEMETRY_LAST_REPORT, TELEMETRY_URL};
use iv_core::ports::ConfigStorePort;
use iv_core::settings::{encode_flag, parse_stored_flag};
use iv_core::telemetry::TelemetryStatus;
use iv_core::TourResult;
use tracing::{info, info_span, Instrument};

pub struct GetTelemetryStatus {
    config_store: Arc<dyn ConfigStorePort>,
    default_url: String,
}

impl GetTelemetryStatus {
    /// `default_url` is used unless an admin stored an override.
    pub fn new(config_store: Arc<dyn ConfigStorePort>, default_url: impl Into<String>) -> Self {
        Self {
            config_store,
            default_url: default_url.into(),
        }
    }

    pub async fn execute(&self) -> TourResult<TelemetryStatus> {
        let span = info_span!("usecase.get_telemetry_status.execute");

        async {
            let enabled = self.config_store.get_app_value(TELEMETRY_ENABLED).await?;
            let last_report = self.config_store.get_app_value(TELEMETRY_LAST_REPORT).await?;
            let telemetry_url = self
                .config_store
                .get_app_value_non_empty(TELEMETRY_URL)
                .await?
                .unwrap_or_else(|| self.default_url.clone());

            Ok(TelemetryStatus {
                enabled: parse_stored_flag(enabled.as_deref(), true),
                last_report: last_report.and_then(|v| v.trim().parse().ok()),
                telemetry_url,
            })
        }
        .instrument(span)
        .await
    }
}

pub struct SetTelemetryEnabled {
    config_store: Arc<dyn ConfigStorePort>,
}

impl SetTelemetryEnabled {
    pub fn new(config_store: Arc<dyn ConfigStorePort>) -> Self {
        Self { config_store }
    }

    pub async fn execute(&self, enabled: bool) -> TourResult<()> {
        let span = info_span!("usecase.set_telemetry_enabled.execute", enabled);

        async {
            self.config_store
                .set_app_value(TELEMETRY_ENABLED, encode_flag(enabled))
                .await?;
            info!(enabled, "telemetry setting updated");
            Ok(())
        }
        .instrument(span)
        .await
    }
}
