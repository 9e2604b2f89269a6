//! Per-track enhancement worker

use std::path::Path;
use std::sync::Arc;

use crate::domain::model::*;
use crate::domain::rules::InvocationBuilder;
use crate::ports::*;
use crate::utils::path::PathUtils;

/// Produces one enhanced side-car per track
pub struct EnhanceWorker {
    tool_port: Arc<dyn ToolPort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
    ffmpeg: String,
}

impl EnhanceWorker {
    pub fn new(
        tool_port: Arc<dyn ToolPort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
        ffmpeg: impl Into<String>,
    ) -> Self {
        Self {
            tool_port,
            fs_port,
            log_port,
            ffmpeg: ffmpeg.into(),
        }
    }

    /// Encode `track` into its side-car unless the side-car already exists.
    ///
    /// Never returns an error: engine failures are logged and reported as
    /// `TrackOutcome::Failed`, leaving the side-car missing for the remux
    /// stage to trip over.
    pub async fn enhance(&self, input: &Path, position: usize, track: &TrackDescriptor) -> TrackReport {
        let sidecar = PathUtils::sidecar_path(input, &track.index);
        let report = |outcome| TrackReport {
            position,
            index: track.index.clone(),
            sidecar: sidecar.clone(),
            outcome,
        };

        if self.fs_port.file_exists(&sidecar).await {
            self.log_port
                .info(&format!(
                    "Enhanced track {} already exists, skipping processing",
                    track.index
                ))
                .await;
            return report(TrackOutcome::Skipped);
        }

        let invocation = ToolInvocation::new(
            ToolKind::Transcode,
            self.ffmpeg.clone(),
            InvocationBuilder::transcode_args(input, track, &sidecar),
        )
        .with_context(format!("track {}", track.index));

        self.log_port
            .info(&format!(
                "Enhancing {} with {:?} downmix",
                track,
                track.layout_class()
            ))
            .await;

        let outcome = match self
            .tool_port
            .run_streaming(&invocation, Arc::clone(&self.log_port))
            .await
        {
            Ok(output) if output.success => TrackOutcome::Enhanced,
            Ok(output) => {
                let status = output
                    .exit_code
                    .map(|code| format!("exit status: {}", code))
                    .unwrap_or_else(|| "terminated by signal".to_string());
                TrackOutcome::Failed { reason: status }
            }
            Err(e) => TrackOutcome::Failed {
                reason: e.to_string(),
            },
        };

        match &outcome {
            TrackOutcome::Failed { reason } => {
                self.log_port
                    .error(&format!(
                        "FFmpeg command for track {} failed: {}",
                        track.index, reason
                    ))
                    .await;
            }
            _ => {
                self.log_port
                    .info(&format!(
                        "Track {} enhanced: {}",
                        track.index,
                        sidecar.display()
                    ))
                    .await;
            }
        }

        report(outcome)
    }
}
