use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prbsweep_core::{
    load_config, run_sweep, validate_config, FreshserviceClient, SanitizedConfig,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("PRBSWEEP_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    let sanitized = serde_json::to_string(&SanitizedConfig::from(&config)).unwrap_or_default();
    info!(version = VERSION, config = %sanitized, "Configuration loaded");

    // Create helpdesk client
    let client = FreshserviceClient::new(&config.helpdesk)
        .context("Failed to create helpdesk client")?;

    // Run the sweep. Individual update failures are recorded in the
    // report and do not fail the run; triage and integrity errors do.
    let report = run_sweep(&client, &config).await.context("Sweep failed")?;

    info!(
        old = report.buckets.old.len(),
        offboarded = report.buckets.offboarded.len(),
        patching = report.buckets.patching.len(),
        keep = report.buckets.keep.len(),
        closed = report.disposal.closed(),
        not_closed = ?report.disposal.not_closed(),
        "Sweep finished"
    );

    Ok(())
}
