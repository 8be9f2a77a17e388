use std::str::FromStr;
use std::sync::Arc;

use iv_core::keys::{
    WIZARD_COMPLETED, WIZARD_COMPLETED_COUNT, WIZARD_SKIPPED, WIZARD_SKIPPED_COUNT, WIZARD_STARTED,
    WIZARD_STARTED_COUNT,
};
use iv_core::ports::{ClockPort, ConfigStorePort};
use iv_core::{TourError, TourResult};
use tracing::{debug, info, info_span, Instrument};

use crate::usecases::internal::increment_counter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    Started,
    Completed,
    Skipped,
}

impl WizardEvent {
    fn user_key(self) -> &'static str {
        match self {
            WizardEvent::Started => WIZARD_STARTED,
            WizardEvent::Completed => WIZARD_COMPLETED,
            WizardEvent::Skipped => WIZARD_SKIPPED,
        }
    }

    fn counter_key(self) -> &'static str {
        match self {
            WizardEvent::Started => WIZARD_STARTED_COUNT,
            WizardEvent::Completed => WIZARD_COMPLETED_COUNT,
            WizardEvent::Skipped => WIZARD_SKIPPED_COUNT,
        }
    }

    /// Start and completion count once per user; skips count every time.
    fn is_write_once(self) -> bool {
        !matches!(self, WizardEvent::Skipped)
    }
}

impl FromStr for WizardEvent {
    type Err = TourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(WizardEvent::Started),
            "complete" => Ok(WizardEvent::Completed),
            "skip" => Ok(WizardEvent::Skipped),
            other => Err(TourError::validation(format!("Unknown wizard event '{other}'"))),
        }
    }
}

/// Records a tour event for a user and bumps the matching counter.
pub struct TrackWizardEvent {
    config_store: Arc<dyn ConfigStorePort>,
    clock: Arc<dyn ClockPort>,
}

impl TrackWizardEvent {
    pub fn new(config_store: Arc<dyn ConfigStorePort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            config_store,
            clock,
        }
    }

    /// Returns whether the event was recorded.
    pub async fn execute(&self, user_id: &str, event: WizardEvent) -> TourResult<bool> {
        let span = info_span!("usecase.track_wizard_event.execute", user_id = %user_id, event = ?event);

        async {
            let key = event.user_key();
            if event.is_write_once()
                && self.config_store.get_user_value(user_id, key).await?.is_some()
            {
                debug!("event already recorded");
                return Ok(false);
            }

            let now = self.clock.now_secs();
            self.config_store
                .set_user_value(user_id, key, &now.to_string())
                .await?;
            let total = increment_counter(self.config_store.as_ref(), event.counter_key()).await?;

            info!(at = now, total, "wizard event recorded");
            Ok(true)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::Harness;

    fn usecase(h: &Harness) -> TrackWizardEvent {
        TrackWizardEvent::new(h.config_store(), h.clock.clone())
    }

    #[test]
    fn events_parse_from_route_names() {
        assert_eq!("start".parse::<WizardEvent>().unwrap(), WizardEvent::Started);
        assert_eq!("complete".parse::<WizardEvent>().unwrap(), WizardEvent::Completed);
        assert_eq!("skip".parse::<WizardEvent>().unwrap(), WizardEvent::Skipped);
        assert!("finish".parse::<WizardEvent>().is_err());
    }

    #[tokio::test]
    async fn start_is_recorded_once() {
        let h = Harness::new();
        let uc = usecase(&h);

        assert!(uc.execute("bob", WizardEvent::Started).await.unwrap());
        h.clock.advance(60);
        assert!(!uc.execute("bob", WizardEvent::Started).await.unwrap());

        assert_eq!(h.user_value("bob", WIZARD_STARTED).await.as_deref(), Some("1700000000"));
        assert_eq!(h.app_value(WIZARD_STARTED_COUNT).await.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn completions_count_distinct_users() {
        let h = Harness::new();
        let uc = usecase(&h);

        uc.execute("alice", WizardEvent::Completed).await.unwrap();
        uc.execute("bob", WizardEvent::Completed).await.unwrap();
        uc.execute("alice", WizardEvent::Completed).await.unwrap();

        assert_eq!(h.app_value(WIZARD_COMPLETED_COUNT).await.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn every_skip_is_recorded() {
        let h = Harness::new();
        let uc = usecase(&h);

        uc.execute("bob", WizardEvent::Skipped).await.unwrap();
        h.clock.advance(30);
        assert!(uc.execute("bob", WizardEvent::Skipped).await.unwrap());

        assert_eq!(h.user_value("bob", WIZARD_SKIPPED).await.as_deref(), Some("1700000030"));
        assert_eq!(h.app_value(WIZARD_SKIPPED_COUNT).await.as_deref(), Some("2"));
    }
}
