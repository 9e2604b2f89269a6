// Application layer - Use case interactors

pub mod catalog_interactor;
pub mod cleanup_interactor;
pub mod container;
pub mod enhance_interactor;
pub mod pipeline_interactor;
pub mod remux_interactor;

// Re-export interactors
pub use catalog_interactor::CatalogInteractor;
pub use cleanup_interactor::{CleanupInteractor, CleanupReport};
pub use container::{AppContainer, DefaultAppContainer};
pub use enhance_interactor::{EnhanceCoordinator, EnhanceWorker};
pub use pipeline_interactor::PipelineInteractor;
pub use remux_interactor::RemuxInteractor;
