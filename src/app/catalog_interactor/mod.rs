// Catalog interactor - Lists audio tracks of the input container

use std::path::Path;
use std::sync::Arc;

use crate::domain::model::*;
use crate::domain::rules::*;
use crate::error::{EnhanceError, EnhanceResult};
use crate::ports::*;

/// Extracts the ordered track catalog with the inspection tool
pub struct CatalogInteractor {
    tool_port: Arc<dyn ToolPort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
    ffprobe: String,
}

impl CatalogInteractor {
    /// Create new catalog interactor with injected ports
    pub fn new(
        tool_port: Arc<dyn ToolPort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
        ffprobe: impl Into<String>,
    ) -> Self {
        Self {
            tool_port,
            fs_port,
            log_port,
            ffprobe: ffprobe.into(),
        }
    }

    /// Probe the input and parse its audio streams.
    ///
    /// Fails with `NotFound` before running anything if the input is missing,
    /// and with `ToolInvocation` if the inspection tool cannot run or fails.
    pub async fn extract(&self, input: &Path) -> EnhanceResult<CatalogParse> {
        if !self.fs_port.file_exists(input).await {
            return Err(EnhanceError::NotFound {
                path: input.display().to_string(),
            });
        }

        let invocation = ToolInvocation::new(
            ToolKind::Inspect,
            self.ffprobe.clone(),
            InvocationBuilder::probe_args(input),
        );
        self.log_port
            .debug(&format!("Running {}", invocation))
            .await;

        let output = self.tool_port.run_captured(&invocation).await?;
        let diagnostics = output.combined();
        let output = output.check(&invocation, diagnostics)?;

        let parse = CatalogParser::parse(&output.stdout);
        if parse.dropped > 0 {
            self.log_port
                .debug(&format!(
                    "Dropped {} incomplete inspection rows",
                    parse.dropped
                ))
                .await;
        }

        self.log_port
            .info(&format!(
                "Found {} audio tracks in {}",
                parse.catalog.len(),
                input.display()
            ))
            .await;
        for track in &parse.catalog {
            self.log_port.info(&format!("  {}", track)).await;
        }

        Ok(parse)
    }
}
