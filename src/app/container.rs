use std::sync::Arc;

use crate::adapters::{LocalFsAdapter, ProcessToolAdapter, TracingLogAdapter};
use crate::app::{
    catalog_interactor::CatalogInteractor, cleanup_interactor::CleanupInteractor,
    enhance_interactor::{EnhanceCoordinator, EnhanceWorker},
    pipeline_interactor::PipelineInteractor, remux_interactor::RemuxInteractor,
};
use crate::config_initialization::PipelineConfig;
use crate::ports::{FsPort, LogPort, ToolPort};

pub trait AppContainer: Send + Sync {
    fn pipeline_interactor(&self) -> Arc<PipelineInteractor>;
}

pub struct DefaultAppContainer {
    pipeline_interactor: Arc<PipelineInteractor>,
}

impl DefaultAppContainer {
    /// Wire the process, filesystem and tracing adapters
    pub fn new(config: &PipelineConfig) -> Self {
        Self::with_ports(
            config,
            Arc::new(ProcessToolAdapter::new()),
            Arc::new(LocalFsAdapter::new()),
            Arc::new(TracingLogAdapter::new()),
        )
    }

    /// Wire the interactors over caller-supplied ports
    pub fn with_ports(
        config: &PipelineConfig,
        tool_port: Arc<dyn ToolPort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        let catalog = Arc::new(CatalogInteractor::new(
            Arc::clone(&tool_port),
            Arc::clone(&fs_port),
            Arc::clone(&log_port),
            config.ffprobe.clone(),
        ));

        let worker = Arc::new(EnhanceWorker::new(
            Arc::clone(&tool_port),
            Arc::clone(&fs_port),
            Arc::clone(&log_port),
            config.ffmpeg.clone(),
        ));
        let enhance = Arc::new(EnhanceCoordinator::new(worker, Arc::clone(&log_port)));

        let remux = Arc::new(RemuxInteractor::new(
            Arc::clone(&tool_port),
            Arc::clone(&log_port),
            config.ffmpeg.clone(),
        ));

        let cleanup = Arc::new(CleanupInteractor::new(
            Arc::clone(&fs_port),
            Arc::clone(&log_port),
        ));

        let pipeline_interactor = Arc::new(PipelineInteractor::new(
            catalog,
            enhance,
            remux,
            cleanup,
            log_port,
        ));

        Self {
            pipeline_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn pipeline_interactor(&self) -> Arc<PipelineInteractor> {
        Arc::clone(&self.pipeline_interactor)
    }
}
