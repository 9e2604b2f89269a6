// Tracing log adapter - Structured logging using tracing crate

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::ports::*;

/// Log sink backed by the global tracing subscriber
pub struct TracingLogAdapter;

impl TracingLogAdapter {
    /// Create new tracing log adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingLogAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogPort for TracingLogAdapter {
    async fn info(&self, message: &str) {
        info!("{}", message);
    }

    async fn warn(&self, message: &str) {
        warn!("{}", message);
    }

    async fn error(&self, message: &str) {
        error!("{}", message);
    }

    async fn debug(&self, message: &str) {
        debug!("{}", message);
    }

    async fn tool_line(&self, kind: ToolKind, context: &str, line: &str) {
        info!(target: "ffmpeg", tool = %kind, context = context, "{}", line);
    }
}
