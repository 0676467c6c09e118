//! Sundial CLI
//!
//! Command-line entry point: starts the clock driver and the API
//! server, or prints a sample configuration file.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sundial::api::{serve, ApiConfig, AppState};
use sundial::clock::{ClockDriver, DriverConfig};
use sundial::config::{generate_default_config, Config, LoggingConfig};
use sundial::events::{EventHub, HubConfig};

#[derive(Parser)]
#[command(name = "sundial", version, about = "Wall-clock and alarm engine")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the clock and API server (default)
    Serve {
        /// Path to a TOML config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the API host
        #[arg(long)]
        host: Option<String>,

        /// Override the API port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print a sample configuration file
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config) => {
            print!("{}", generate_default_config());
            Ok(())
        }
        Some(Commands::Serve { config, host, port }) => run_serve(config, host, port).await,
        None => run_serve(None, None, None).await,
    }
}

async fn run_serve(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let mut config = match config_path {
        Some(path) => Config::load_with_env(&path)?,
        None => Config::load_default(),
    };

    if let Some(host) = host {
        config.api.host = host;
    }
    if let Some(port) = port {
        config.api.port = port;
    }

    init_logging(&config.logging);

    tracing::info!("Sundial v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        locale = ?config.clock.locale,
        format = %config.clock.format,
        "Clock configuration"
    );

    let hub = Arc::new(EventHub::new(HubConfig::default()));

    let driver_config = DriverConfig {
        tick_interval: Duration::from_millis(config.clock.tick_interval_ms),
        alarm_expiry: Duration::from_secs(config.clock.alarm_expiry_secs),
        locale: config.clock.locale,
        initial_format: config.clock.format,
    };
    let driver = Arc::new(ClockDriver::new(driver_config, Arc::clone(&hub)));

    // Start the 1 Hz tick task
    let tick_handle = driver.start();

    let api_config = ApiConfig::new(config.api.host.clone(), config.api.port);
    let state = AppState::new(Arc::clone(&driver), hub, api_config.clone());

    serve(state, &api_config).await?;

    tracing::info!("Shutting down...");
    driver.stop().await;
    tick_handle.abort();

    tracing::info!("Sundial shutdown complete");
    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("sundial={}", config.level)),
    );

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
