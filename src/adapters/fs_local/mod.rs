// Local filesystem adapter

use std::path::Path;

use async_trait::async_trait;

use crate::ports::*;

/// Filesystem adapter over tokio::fs
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    /// Create new filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn file_exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }

    async fn remove_file(&self, path: &Path) -> std::io::Result<()> {
        tokio::fs::remove_file(path).await
    }
}
