use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use prmon::{app, monitor, util};

#[derive(Parser, Debug)]
#[command(name = "prmon", version, about = "TUI monitor for pull request screenshots")]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Monitor service base URL (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Directory screenshots are saved to (overrides config)
    #[arg(long)]
    download_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = util::config::AppConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if let Some(dir) = cli.download_dir {
        config.download.dir = Some(dir);
    }

    let _guard = setup_logging(&config, cli.debug)?;

    info!(base_url = %config.api.base_url, "prmon starting");

    let client = monitor::MonitorClient::new(
        &config.api.base_url,
        config.api.artifact_base_url.as_deref(),
    )?;

    app::event_loop::run(config, client).await
}

fn setup_logging(
    config: &util::config::AppConfig,
    debug: bool,
) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::EnvFilter;

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "prmon.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let default_filter = if debug { "prmon=debug" } else { "prmon=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    Ok(guard)
}
