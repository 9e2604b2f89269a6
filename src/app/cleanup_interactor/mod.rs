// Cleanup interactor - Removes side-car files after a successful remux

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::model::*;
use crate::error::EnhanceError;
use crate::ports::*;
use crate::utils::path::PathUtils;

/// What cleanup removed, and why it stopped if it stopped early
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub error: Option<EnhanceError>,
}

/// Deletes side-cars in catalog order
pub struct CleanupInteractor {
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
}

impl CleanupInteractor {
    pub fn new(fs_port: Arc<dyn FsPort>, log_port: Arc<dyn LogPort>) -> Self {
        Self { fs_port, log_port }
    }

    /// Remove every side-car named by the catalog.
    ///
    /// Stops at the first failed deletion; side-cars after it are left on disk.
    pub async fn remove_sidecars(&self, input: &Path, catalog: &TrackCatalog) -> CleanupReport {
        let mut report = CleanupReport::default();

        for track in catalog {
            let sidecar = PathUtils::sidecar_path(input, &track.index);
            if let Err(source) = self.fs_port.remove_file(&sidecar).await {
                self.log_port
                    .error(&format!(
                        "Failed to delete temporary file {}: {}",
                        sidecar.display(),
                        source
                    ))
                    .await;
                report.error = Some(EnhanceError::Cleanup {
                    path: sidecar,
                    source,
                });
                return report;
            }
            self.log_port
                .info(&format!(
                    "Temporary file {} removed successfully.",
                    sidecar.display()
                ))
                .await;
            report.removed.push(sidecar);
        }

        report
    }
}
