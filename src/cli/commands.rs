//! Command implementations

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::{AppContainer, DefaultAppContainer};
use crate::cli::Cli;
use crate::config_initialization::PipelineConfig;

/// Execute the enhance pipeline and print the output path on success
pub async fn enhance(cli: Cli, config: PipelineConfig) -> Result<()> {
    if let Some(source) = &config.source_file {
        info!("Loaded configuration from {}", source.display());
    }
    info!("Input: {}", cli.input.display());
    info!("Tools: ffprobe={}, ffmpeg={}", config.ffprobe, config.ffmpeg);

    let container = DefaultAppContainer::new(&config);
    let report = container
        .pipeline_interactor()
        .run(&cli.input, cli.output)
        .await
        .with_context(|| format!("Failed to enhance {}", cli.input.display()))?;

    if report.dropped_rows > 0 {
        warn!("Ignored {} incomplete track rows", report.dropped_rows);
    }
    if let Some(err) = &report.cleanup_error {
        warn!(
            "Output written but {} side-car files were left behind: {}",
            report.tracks.len() - report.removed_sidecars.len(),
            err
        );
    }

    println!("Enhanced MKV generated: {}", report.output_path.display());
    Ok(())
}
