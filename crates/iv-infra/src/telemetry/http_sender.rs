use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use iv_core::ports::{TelemetryError, TelemetrySenderPort};
use iv_core::telemetry::TelemetryReport;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Posts telemetry reports as JSON.
pub struct HttpTelemetrySender {
    http: reqwest::Client,
}

impl HttpTelemetrySender {
    pub fn new(app_version: &str) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_str(&format!("IntroVox/{app_version}"))
                .context("invalid telemetry user agent")?,
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to create telemetry http client")?;

        Ok(Self { http })
    }
}

#[async_trait]
impl TelemetrySenderPort for HttpTelemetrySender {
    async fn send(&self, url: &str, report: &TelemetryReport) -> Result<(), TelemetryError> {
        let response = self
            .http
            .post(url)
            .json(report)
            .send()
            .await
            .map_err(|e| TelemetryError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TelemetryError::Rejected(status.as_u16()))
        }
    }
}
