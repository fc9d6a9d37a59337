//! # Node Rewards Runtime
//!
//! Entry point: loads configuration, applies genesis and runs until Ctrl-C.

use anyhow::{Context, Result};
use nr_03_node_rewards::adapters::SystemClock;
use rewards_runtime::container::RuntimeConfig;
use rewards_runtime::genesis::GenesisConfig;
use rewards_runtime::RewardsRuntime;
use rewards_telemetry::{init_telemetry, render_metrics, TelemetryConfig};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry =
        init_telemetry(TelemetryConfig::from_env()).context("Failed to initialize telemetry")?;

    let config = RuntimeConfig::from_env();
    config.validate().context("Invalid runtime configuration")?;

    let genesis = match &config.genesis_file {
        Some(path) => GenesisConfig::load(path)
            .with_context(|| format!("Failed to load genesis from {}", path.display()))?,
        None => {
            warn!("NR_GENESIS_FILE not set, using devnet genesis");
            GenesisConfig::devnet()
        }
    };

    let mut runtime = RewardsRuntime::new(config, genesis, Arc::new(SystemClock))?;
    runtime.start();

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Received shutdown signal");

    runtime.shutdown().await;

    match render_metrics() {
        Ok(metrics) => debug!(metrics = %metrics, "Final metrics snapshot"),
        Err(e) => warn!(error = %e, "Failed to render metrics"),
    }
    Ok(())
}
