//! mkv-enhance
//!
//! Adds an enhanced stereo downmix of every audio track to an MKV file while
//! keeping the original streams.
//!
//! # Usage
//!
//! ```bash
//! mkv-enhance movie.mkv
//! mkv-enhance movie.mkv --output louder.mkv --log-level debug
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use mkv_enhance::cli::{commands, Cli};
use mkv_enhance::config_initialization::initialize_configuration;
use mkv_enhance::utils::logging::LoggingSystem;

/// Main entry point for the mkv-enhance application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Settings decide the log level, so they load before the subscriber
    let config = initialize_configuration(&cli)?;

    let logging = LoggingSystem::new(config.logging.clone());
    logging
        .initialize()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    logging.log_system_info();

    commands::enhance(cli, config).await?;

    info!("mkv-enhance completed successfully");
    Ok(())
}
