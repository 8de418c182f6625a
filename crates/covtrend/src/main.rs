//! Main entry point for covtrend.

use anyhow::Context;
use clap::Parser;
use covtrend::{run, Args};
use covtrend_common::init_logging;
use covtrend_config::ConfigLoader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
    .context("Failed to load configuration")?;

    args.apply_overrides(&mut config);
    config
        .validate_all()
        .context("Invalid configuration after command line overrides")?;

    init_logging(config.logging_config())
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))?;

    info!("Starting covtrend {}", env!("CARGO_PKG_VERSION"));

    match run(&config).await {
        Ok(paths) => {
            info!("Done, {} files written", paths.len());
            Ok(())
        }
        Err(e) => {
            error!("covtrend failed: {}", e);
            Err(e.into())
        }
    }
}
