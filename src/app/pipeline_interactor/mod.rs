// Pipeline interactor - Orchestrates extract, enhance, remux and cleanup

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app::catalog_interactor::CatalogInteractor;
use crate::app::cleanup_interactor::CleanupInteractor;
use crate::app::enhance_interactor::EnhanceCoordinator;
use crate::app::remux_interactor::RemuxInteractor;
use crate::domain::model::*;
use crate::error::EnhanceResult;
use crate::ports::*;
use crate::utils::path::PathUtils;

/// Interactor for the full enhancement use case
pub struct PipelineInteractor {
    catalog: Arc<CatalogInteractor>,
    enhance: Arc<EnhanceCoordinator>,
    remux: Arc<RemuxInteractor>,
    cleanup: Arc<CleanupInteractor>,
    log_port: Arc<dyn LogPort>,
}

impl PipelineInteractor {
    pub fn new(
        catalog: Arc<CatalogInteractor>,
        enhance: Arc<EnhanceCoordinator>,
        remux: Arc<RemuxInteractor>,
        cleanup: Arc<CleanupInteractor>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            catalog,
            enhance,
            remux,
            cleanup,
            log_port,
        }
    }

    /// Run every stage against `input`.
    ///
    /// Extraction and remux failures abort the run; remux failure leaves the
    /// side-cars in place. Track failures and cleanup failures do not: the
    /// former surface at remux time, the latter are recorded in the report.
    pub async fn run(&self, input: &Path, output: Option<PathBuf>) -> EnhanceResult<PipelineReport> {
        let output_path = output.unwrap_or_else(|| PathUtils::output_path(input));

        let parse = self.catalog.extract(input).await?;
        let catalog = parse.catalog;

        let tracks = self.enhance.enhance_all(input, &catalog).await;
        let failed = tracks.iter().filter(|t| t.outcome.is_failed()).count();
        if failed > 0 {
            self.log_port
                .warn(&format!(
                    "{} of {} tracks failed to enhance; remux will reference missing side-cars",
                    failed,
                    tracks.len()
                ))
                .await;
        }

        self.remux.remux(input, &output_path, &catalog).await?;

        let cleanup = self.cleanup.remove_sidecars(input, &catalog).await;
        if let Some(err) = &cleanup.error {
            self.log_port
                .warn(&format!("Cleanup stopped early: {}", err))
                .await;
        }

        Ok(PipelineReport {
            output_path,
            tracks,
            dropped_rows: parse.dropped,
            removed_sidecars: cleanup.removed,
            cleanup_error: cleanup.error,
        })
    }
}
