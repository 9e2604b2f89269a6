// Enhance interactor - Fans out one worker per track and joins them all

use std::path::Path;
use std::sync::Arc;

use futures_util::future::join_all;

use crate::domain::model::*;
use crate::ports::*;
use crate::utils::path::PathUtils;

pub mod worker;

pub use worker::EnhanceWorker;

/// Runs every track's worker concurrently behind a single join barrier
pub struct EnhanceCoordinator {
    worker: Arc<EnhanceWorker>,
    log_port: Arc<dyn LogPort>,
}

impl EnhanceCoordinator {
    pub fn new(worker: Arc<EnhanceWorker>, log_port: Arc<dyn LogPort>) -> Self {
        Self { worker, log_port }
    }

    /// Spawn one task per catalog entry and wait for all of them.
    ///
    /// No sibling is cancelled when another fails. Reports come back in
    /// catalog order regardless of completion order.
    pub async fn enhance_all(&self, input: &Path, catalog: &TrackCatalog) -> Vec<TrackReport> {
        let tasks: Vec<_> = catalog
            .iter()
            .enumerate()
            .map(|(position, track)| {
                let worker = Arc::clone(&self.worker);
                let input = input.to_path_buf();
                let track = track.clone();
                tokio::spawn(async move { worker.enhance(&input, position, &track).await })
            })
            .collect();

        let results = join_all(tasks).await;

        let mut reports = Vec::with_capacity(results.len());
        for (position, (result, track)) in results.into_iter().zip(catalog.iter()).enumerate() {
            match result {
                Ok(report) => reports.push(report),
                Err(e) => {
                    self.log_port
                        .error(&format!("Worker for track {} panicked: {}", track.index, e))
                        .await;
                    reports.push(TrackReport {
                        position,
                        index: track.index.clone(),
                        sidecar: PathUtils::sidecar_path(input, &track.index),
                        outcome: TrackOutcome::Failed {
                            reason: format!("worker task failed: {}", e),
                        },
                    });
                }
            }
        }

        reports
    }
}
