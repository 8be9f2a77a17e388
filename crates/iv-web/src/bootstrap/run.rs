use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use iv_core::AppConfig;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::runtime::AppRuntime;
use super::wiring::wire_dependencies;
use crate::http::build_router;

/// How often the background job checks whether a telemetry report is due.
pub const TELEMETRY_CHECK_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Wire the runtime, start the telemetry job and serve until Ctrl-C.
///
/// `config` must already have its defaults resolved.
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let bind_addr: SocketAddr = config
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}': expected host:port", config.bind_addr))?;

    let deps = wire_dependencies(&config)
        .await
        .context("failed to wire dependencies")?;
    let runtime = Arc::new(AppRuntime::new(deps, config.admin_group.clone()));

    let telemetry_job = spawn_telemetry_job(runtime.clone(), TELEMETRY_CHECK_INTERVAL);

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind server on {bind_addr}"))?;
    info!(
        addr = %listener.local_addr().context("failed to resolve listen address")?,
        store = %config.config_store_path.display(),
        "introvox listening"
    );

    let result = serve(listener, runtime, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown requested");
    })
    .await;

    telemetry_job.abort();
    result
}

/// Serve the HTTP API on an already bound listener.
pub async fn serve(
    listener: TcpListener,
    runtime: Arc<AppRuntime>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    axum::serve(listener, build_router(runtime))
        .with_graceful_shutdown(shutdown)
        .await
        .context("server exited unexpectedly")
}

/// Periodically sends the telemetry report when it is due.
///
/// Runs off the request path; every error is logged and the loop goes on.
pub fn spawn_telemetry_job(runtime: Arc<AppRuntime>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match runtime.usecases().send_telemetry_if_due().execute().await {
                Ok(outcome) => debug!(?outcome, "telemetry check finished"),
                Err(e) => warn!(error = %e, "telemetry check failed"),
            }
        }
    })
}
