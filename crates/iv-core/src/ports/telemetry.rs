//! Telemetry delivery port
//!
//! Failures are reported to the caller, which is expected to drop them.

use async_trait::async_trait;
use thiserror::Error;

use crate::telemetry::TelemetryReport;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("telemetry request failed: {0}")]
    Transport(String),

    #[error("telemetry endpoint answered with status {0}")]
    Rejected(u16),
}

#[async_trait]
pub trait TelemetrySenderPort: Send + Sync {
    async fn send(&self, url: &str, report: &TelemetryReport) -> Result<(), TelemetryError>;
}

