use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use iv_core::AppConfig;
use iv_infra::fs::app_data_dir;
use iv_web::bootstrap::tracing::init_tracing_subscriber;
use iv_web::bootstrap::{load_config, resolve_defaults, run_server};

/// IntroVox onboarding tour service.
#[derive(Debug, Parser)]
#[command(name = "introvox", version, about)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted
    #[arg(short, long, env = "INTROVOX_CONFIG")]
    config: Option<PathBuf>,

    /// Overrides `server.bind_addr`
    #[arg(long, env = "INTROVOX_BIND")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path.clone())?,
        None => AppConfig::empty(),
    };
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }

    let config = resolve_defaults(config, app_data_dir()?);

    init_tracing_subscriber(&config.data_dir.join("logs"))
        .context("failed to initialize tracing")?;

    tracing::info!(
        config = ?cli.config,
        data_dir = %config.data_dir.display(),
        "starting introvox"
    );

    run_server(config).await
}
