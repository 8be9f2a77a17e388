use std::sync::Arc;

use iv_core::keys::{TELEMETRY_LAST_ATTEMPT, TELEMETRY_LAST_REPORT};
use iv_core::ports::{ClockPort, ConfigStorePort, TelemetrySenderPort, UserDirectoryPort};
use iv_core::telemetry::is_due;
use iv_core::TourResult;
use tracing::{debug, info, info_span, Instrument};

use super::{CollectTelemetry, GetTelemetryStatus};
use crate::deps::InstanceInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryOutcome {
    Disabled,
    CoolingDown,
    Sent,
    /// Delivery was attempted and failed; the next attempt waits a full cooldown.
    Failed,
}

/// Sends the report when telemetry is on and the cooldown has passed.
///
/// The attempt time is stored before sending. Only store errors are
/// returned; delivery failures end up as [`TelemetryOutcome::Failed`].
pub struct SendTelemetryIfDue {
    config_store: Arc<dyn ConfigStorePort>,
    collect: CollectTelemetry,
    sender: Arc<dyn TelemetrySenderPort>,
    clock: Arc<dyn ClockPort>,
    default_url: String,
}

impl SendTelemetryIfDue {
    pub fn new(
        config_store: Arc<dyn ConfigStorePort>,
        user_directory: Arc<dyn UserDirectoryPort>,
        sender: Arc<dyn TelemetrySenderPort>,
        clock: Arc<dyn ClockPort>,
        instance: InstanceInfo,
    ) -> Self {
        Self {
            default_url: instance.telemetry_url.clone(),
            collect: CollectTelemetry::new(config_store.clone(), user_directory, instance),
            config_store,
            sender,
            clock,
        }
    }

    pub async fn execute(&self) -> TourResult<TelemetryOutcome> {
        let span = info_span!("usecase.send_telemetry_if_due.execute");

        async {
            let status = GetTelemetryStatus::new(self.config_store.clone(), self.default_url.clone())
                .execute()
                .await?;
            if !status.enabled {
                debug!("telemetry disabled, skipping report");
                return Ok(TelemetryOutcome::Disabled);
            }

            let now = self.clock.now_secs();
            let last_attempt = self
                .config_store
                .get_app_value(TELEMETRY_LAST_ATTEMPT)
                .await?
                .and_then(|v| v.trim().parse().ok());
            if !is_due(last_attempt, now) {
                debug!(last_attempt = ?last_attempt, "telemetry cooling down");
                return Ok(TelemetryOutcome::CoolingDown);
            }

            self.config_store
                .set_app_value(TELEMETRY_LAST_ATTEMPT, &now.to_string())
                .await?;

            let report = self.collect.execute().await?;
            match self.sender.send(&status.telemetry_url, &report).await {
                Ok(()) => {
                    self.config_store
                        .set_app_value(TELEMETRY_LAST_REPORT, &now.to_string())
                        .await?;
                    info!(
                        total_users = report.statistics.total_users,
                        wizard_enabled = report.statistics.wizard_enabled,
                        "telemetry report sent"
                    );
                    Ok(TelemetryOutcome::Sent)
                }
                Err(e) => {
                    debug!(error = %e, "telemetry report not delivered");
                    Ok(TelemetryOutcome::Failed)
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{Harness, MockTelemetrySender};
    use iv_core::keys::{TELEMETRY_ENABLED, TELEMETRY_URL};
    use iv_core::ports::TelemetryError;
    use iv_core::telemetry::TELEMETRY_COOLDOWN_SECS;

    fn usecase(h: &Harness, sender: MockTelemetrySender) -> SendTelemetryIfDue {
        let deps = h.deps(Arc::new(sender));
        SendTelemetryIfDue::new(
            deps.config_store,
            deps.user_directory,
            deps.telemetry_sender,
            deps.clock,
            deps.instance,
        )
    }

    #[tokio::test]
    async fn disabled_telemetry_never_sends() {
        let h = Harness::new();
        h.seed_app(TELEMETRY_ENABLED, "false").await;
        let mut sender = MockTelemetrySender::new();
        sender.expect_send().never();

        let outcome = usecase(&h, sender).execute().await.unwrap();

        assert_eq!(outcome, TelemetryOutcome::Disabled);
        assert!(h.app_value(TELEMETRY_LAST_ATTEMPT).await.is_none());
    }

    #[tokio::test]
    async fn successful_send_records_attempt_and_report() {
        let h = Harness::new();
        let mut sender = MockTelemetrySender::new();
        sender
            .expect_send()
            .withf(|url, _| url == "https://telemetry.example.org/introvox")
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = usecase(&h, sender).execute().await.unwrap();

        assert_eq!(outcome, TelemetryOutcome::Sent);
        assert_eq!(h.app_value(TELEMETRY_LAST_ATTEMPT).await.as_deref(), Some("1700000000"));
        assert_eq!(h.app_value(TELEMETRY_LAST_REPORT).await.as_deref(), Some("1700000000"));
    }

    #[tokio::test]
    async fn failure_is_silent_and_waits_for_cooldown() {
        let h = Harness::new();
        let mut sender = MockTelemetrySender::new();
        sender
            .expect_send()
            .times(2)
            .returning(|_, _| Err(TelemetryError::Rejected(503)));
        let uc = usecase(&h, sender);

        assert_eq!(uc.execute().await.unwrap(), TelemetryOutcome::Failed);
        assert!(h.app_value(TELEMETRY_LAST_REPORT).await.is_none());

        h.clock.advance(3_600);
        assert_eq!(uc.execute().await.unwrap(), TelemetryOutcome::CoolingDown);

        h.clock.advance(TELEMETRY_COOLDOWN_SECS);
        assert_eq!(uc.execute().await.unwrap(), TelemetryOutcome::Failed);
    }

    #[tokio::test]
    async fn stored_url_override_is_used() {
        let h = Harness::new();
        h.seed_app(TELEMETRY_URL, "https://override.example.org").await;
        let mut sender = MockTelemetrySender::new();
        sender
            .expect_send()
            .withf(|url, report| url == "https://override.example.org" && report.introvox_version == "1.0.0")
            .times(1)
            .returning(|_, _| Ok(()));

        assert_eq!(usecase(&h, sender).execute().await.unwrap(), TelemetryOutcome::Sent);
    }
}
