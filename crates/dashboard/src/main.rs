//! `ambient-display`: runs the dashboard against an HTTP gateway, rendering to
//! the terminal.
//!
//! Region updates go to stdout, logs to stderr. Type a zone id and press
//! enter to switch that zone.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use dashboard::{ConsoleSurface, Dashboard, HttpGateway, Settings, StdinInput};
use platform::config::app_title;
use platform::SystemClock;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ambient-display", version, about = "Ambient e-paper dashboard client")]
struct Cli {
    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Gateway base URL, overrides the settings file
    #[arg(long)]
    gateway_url: Option<String>,

    /// Log filter, e.g. `debug` or `dashboard=trace` (default: RUST_LOG, then `info`)
    #[arg(long)]
    log_filter: Option<String>,

    /// Do not read zone activations from stdin
    #[arg(long)]
    no_input: bool,
}

fn init_tracing(filter: Option<&str>) -> Result<()> {
    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives).context("invalid --log-filter")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(url) = &cli.gateway_url {
        settings.gateway_url.clone_from(url);
    }
    settings.validate()?;
    Ok(settings)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_filter.as_deref())?;
    let settings = load_settings(&cli)?;

    tracing::info!(gateway = %settings.gateway_url, "{}", app_title());
    let gateway = Arc::new(HttpGateway::new(&settings.gateway_url)?);
    let surface = Arc::new(ConsoleSurface::stdout());
    let input = (!cli.no_input).then(StdinInput::new);

    let dashboard = Dashboard::start(&settings, gateway, surface, SystemClock, input);

    tokio::signal::ctrl_c().await.context("waiting for ctrl-c")?;
    dashboard.shutdown();
    Ok(())
}
