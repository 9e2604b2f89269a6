// Remux interactor - Assembles originals and side-cars into the output container

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::model::*;
use crate::domain::rules::InvocationBuilder;
use crate::error::EnhanceResult;
use crate::ports::*;
use crate::utils::path::PathUtils;

/// Runs the single mux invocation
pub struct RemuxInteractor {
    tool_port: Arc<dyn ToolPort>,
    log_port: Arc<dyn LogPort>,
    ffmpeg: String,
}

impl RemuxInteractor {
    pub fn new(tool_port: Arc<dyn ToolPort>, log_port: Arc<dyn LogPort>, ffmpeg: impl Into<String>) -> Self {
        Self {
            tool_port,
            log_port,
            ffmpeg: ffmpeg.into(),
        }
    }

    /// Build the mux invocation for `catalog`
    pub fn invocation(&self, input: &Path, output: &Path, catalog: &TrackCatalog) -> ToolInvocation {
        let sidecars: Vec<PathBuf> = catalog
            .iter()
            .map(|track| PathUtils::sidecar_path(input, &track.index))
            .collect();

        ToolInvocation::new(
            ToolKind::Mux,
            self.ffmpeg.clone(),
            InvocationBuilder::remux_args(input, output, &sidecars),
        )
    }

    /// Write `output` with each original audio track followed by its enhanced copy.
    ///
    /// A side-car missing because its worker failed makes ffmpeg exit non-zero,
    /// which is returned here as `ToolInvocation`.
    pub async fn remux(&self, input: &Path, output: &Path, catalog: &TrackCatalog) -> EnhanceResult<()> {
        let invocation = self.invocation(input, output, catalog);
        self.log_port.info(&invocation.to_string()).await;

        let result = self.tool_port.run_captured(&invocation).await?;
        let stderr = result.stderr.clone();
        result.check(&invocation, stderr)?;

        self.log_port
            .info(&format!("Remuxed {} tracks into {}", catalog.len(), output.display()))
            .await;
        Ok(())
    }
}
