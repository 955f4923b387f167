//! simcon - Terminal operator console for the data simulator
//!
//! Binary entry point: parses the command line, resolves settings and the
//! control API base URL, then hands off to the TUI or runs a one-shot check.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;
use simcon_app::config::{default_config_path, load_settings, resolve_base_url, Settings};
use simcon_app::Engine;
use simcon_client::{ControlApi, SimulatorClient, TransportConfig};
use simcon_core::prelude::*;

/// simcon - Terminal operator console for the data simulator
#[derive(Parser, Debug)]
#[command(name = "simcon")]
#[command(about = "Terminal operator console for the data simulator", long_about = None)]
struct Args {
    /// Control API base URL (overrides SIMCON_API_URL and the config file)
    #[arg(long, value_name = "BASE_URL")]
    url: Option<String>,

    /// Path to the settings file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Dashboard refresh interval in milliseconds
    #[arg(long, value_name = "MS")]
    poll_interval_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Probe /api/health and /api/status once and print the result
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;
    simcon_core::logging::init()?;

    let settings = settings_for(&args)?;
    let base_url = resolve_base_url(args.url.as_deref(), &settings);
    info!("Control API base URL: {}", base_url);

    let client = SimulatorClient::new(
        TransportConfig::new(base_url.as_str())
            .with_request_timeout(settings.api.request_timeout()),
    )?;

    match args.command {
        Some(Command::Check) => {
            if !check(&client).await {
                std::process::exit(1);
            }
            Ok(())
        }
        None => simcon_tui::run(Engine::new(client, settings, base_url)).await,
    }
}

/// Load settings and apply command line overrides.
///
/// An explicit `--config` path must exist; the default location is optional.
fn settings_for(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) if !path.exists() => {
            return Err(Error::ConfigNotFound { path: path.clone() });
        }
        Some(path) => load_settings(path),
        None => default_config_path()
            .map(|path| load_settings(&path))
            .unwrap_or_default(),
    };

    if let Some(ms) = args.poll_interval_ms {
        settings.polling.interval_ms = ms;
    }

    Ok(settings)
}

/// One-shot probe. Prints a JSON report to stdout and returns `false` if
/// either call failed.
async fn check<A: ControlApi>(api: &A) -> bool {
    let (health, status) = tokio::join!(api.get_health(), api.get_status());

    match (health, status) {
        (Ok(health), Ok(status)) => {
            let report = json!({
                "health": health,
                "status": status,
            });
            match serde_json::to_string_pretty(&report) {
                Ok(text) => println!("{}", text),
                Err(e) => println!("{:?} {:?} ({})", health, status, e),
            }
            true
        }
        (health, status) => {
            if let Err(e) = health {
                eprintln!("❌ Health check failed: {}", e.user_message());
            }
            if let Err(e) = status {
                eprintln!("❌ Status check failed: {}", e.user_message());
            }
            false
        }
    }
}
