//! Process-wide tracing for the IntroVox server
//!
//! - `RUST_LOG` overrides the built-in directives
//! - Lines go to stdout and to a daily file under `<data_dir>/logs`
//! - `SENTRY_DSN` turns on error reporting

use std::path::Path;
use std::sync::OnceLock;

use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static SENTRY_GUARD: OnceLock<sentry::ClientInitGuard> = OnceLock::new();

const LOG_FILE_PREFIX: &str = "introvox.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Noisy dependencies are held at warn whatever the service level is.
const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "reqwest", "rustls", "h2"];

/// Directives used when `RUST_LOG` is unset.
fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    let service = ["iv_app", "iv_infra", "iv_web", "introvox"]
        .iter()
        .map(|target| format!("{target}={level}"));
    let quiet = QUIET_TARGETS.iter().map(|target| format!("{target}=warn"));

    std::iter::once("info".to_string())
        .chain(service)
        .chain(quiet)
        .collect::<Vec<_>>()
        .join(",")
}

/// `2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message`
fn line_layer<S, W>(writer: W, ansi: bool) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(writer)
}

fn init_sentry() -> bool {
    let Ok(dsn) = std::env::var("SENTRY_DSN") else {
        return false;
    };
    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            traces_sample_rate: 0.2,
            ..Default::default()
        },
    ));
    SENTRY_GUARD.set(guard).is_ok()
}

fn file_writer(logs_dir: &Path) -> anyhow::Result<NonBlocking> {
    std::fs::create_dir_all(logs_dir)?;

    let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    FILE_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("file log writer already initialized"))?;

    Ok(writer)
}

/// Registers the global subscriber. Call once, before wiring.
///
/// A logs dir that cannot be created only disables the file output.
pub fn init_tracing_subscriber(logs_dir: &Path) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(cfg!(debug_assertions))));

    let sentry_layer = init_sentry().then(sentry_tracing::layer);

    let file_layer = match file_writer(logs_dir) {
        Ok(writer) => Some(line_layer(writer, false)),
        Err(err) => {
            eprintln!("file logging disabled ({}): {err:#}", logs_dir.display());
            None
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(sentry_layer)
        .with(line_layer(std::io::stdout, true))
        .with(file_layer)
        .try_init()?;

    Ok(())
}
