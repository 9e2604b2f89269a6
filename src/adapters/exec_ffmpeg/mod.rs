//! External tool execution adapter
//!
//! Runs ffprobe/ffmpeg as child processes on the tokio runtime.

use std::collections::VecDeque;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{EnhanceError, EnhanceResult};
use crate::ports::*;

/// Number of trailing stderr lines kept for error reports
const DIAGNOSTIC_TAIL_LINES: usize = 50;

/// Process-backed tool adapter
pub struct ProcessToolAdapter;

impl ProcessToolAdapter {
    /// Create new process adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProcessToolAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolPort for ProcessToolAdapter {
    async fn run_captured(&self, invocation: &ToolInvocation) -> EnhanceResult<ToolOutput> {
        debug!(tool = %invocation.kind, "Spawning {}", invocation.program);

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| invocation.launch_error(&e))?;

        Ok(ToolOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    async fn run_streaming(
        &self,
        invocation: &ToolInvocation,
        log: Arc<dyn LogPort>,
    ) -> EnhanceResult<ToolOutput> {
        debug!(tool = %invocation.kind, context = %invocation.context, "Spawning {}", invocation.program);

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| invocation.launch_error(&e))?;

        let stderr = child.stderr.take().ok_or_else(|| EnhanceError::ToolInvocation {
            tool: invocation.program.clone(),
            message: "stderr was not captured".to_string(),
            output: String::new(),
        })?;

        // Drain stderr on its own task so the child never blocks on a full pipe
        let kind = invocation.kind;
        let context = invocation.context.clone();
        let line_log = Arc::clone(&log);
        let forwarder = tokio::spawn(async move {
            forward_diagnostics(BufReader::new(stderr), kind, &context, &*line_log).await
        });

        let status = child.wait().await.map_err(|e| invocation.wait_error(&e))?;
        let stderr = match forwarder.await {
            Ok(tail) => tail,
            Err(e) => {
                warn!(tool = %kind, "Diagnostic forwarder for {} stopped: {}", invocation.program, e);
                log.warn(&format!(
                    "Diagnostics from {} were lost: {}",
                    invocation.program, e
                ))
                .await;
                String::new()
            }
        };

        Ok(ToolOutput {
            success: status.success(),
            exit_code: status.code(),
            stdout: String::new(),
            stderr,
        })
    }
}

/// Forward every stderr line to `log` and return the last lines joined.
///
/// Lines are split on raw bytes and decoded lossily, so non-UTF-8 output
/// never ends the loop. The pipe is read until EOF in every case; closing it
/// early would kill the child on its next write.
async fn forward_diagnostics<R>(
    mut reader: R,
    kind: ToolKind,
    context: &str,
    log: &dyn LogPort,
) -> String
where
    R: AsyncBufRead + Unpin,
{
    let mut tail = VecDeque::with_capacity(DIAGNOSTIC_TAIL_LINES);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = trim_line_ending(&buf);
                let line = String::from_utf8_lossy(line).into_owned();
                log.tool_line(kind, context, &line).await;
                if tail.len() == DIAGNOSTIC_TAIL_LINES {
                    tail.pop_front();
                }
                tail.push_back(line);
            }
            Err(e) => {
                warn!(tool = %kind, context = context, "Stopped reading diagnostics: {}", e);
                let _ = tokio::io::copy_buf(&mut reader, &mut tokio::io::sink()).await;
                break;
            }
        }
    }
    tail.into_iter().collect::<Vec<_>>().join("\n")
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CollectingLog {
        lines: Mutex<Vec<String>>,
        warnings: Mutex<Vec<String>>,
    }

    impl CollectingLog {
        fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LogPort for CollectingLog {
        async fn info(&self, _message: &str) {}

        async fn warn(&self, message: &str) {
            self.warnings.lock().unwrap().push(message.to_string());
        }

        async fn error(&self, _message: &str) {}

        async fn debug(&self, _message: &str) {}

        async fn tool_line(&self, kind: ToolKind, context: &str, line: &str) {
            assert_eq!(kind, ToolKind::Transcode);
            assert_eq!(context, "track 1");
            self.lines.lock().unwrap().push(line.to_string());
        }
    }

    struct PanickingLog {
        warnings: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LogPort for PanickingLog {
        async fn info(&self, _message: &str) {}

        async fn warn(&self, message: &str) {
            self.warnings.lock().unwrap().push(message.to_string());
        }

        async fn error(&self, _message: &str) {}

        async fn debug(&self, _message: &str) {}

        async fn tool_line(&self, _kind: ToolKind, _context: &str, _line: &str) {
            panic!("log sink is broken");
        }
    }

    fn shell(script: &str) -> ToolInvocation {
        ToolInvocation::new(
            ToolKind::Transcode,
            "sh",
            vec!["-c".to_string(), script.to_string()],
        )
        .with_context("track 1")
    }

    #[tokio::test]
    async fn test_missing_program_is_launch_error() {
        let adapter = ProcessToolAdapter::new();
        let invocation = ToolInvocation::new(
            ToolKind::Inspect,
            "mkv-enhance-definitely-missing-tool",
            vec!["-version".to_string()],
        );

        let err = adapter.run_captured(&invocation).await.unwrap_err();
        match err {
            EnhanceError::ToolInvocation { tool, message, .. } => {
                assert_eq!(tool, "mkv-enhance-definitely-missing-tool");
                assert!(message.starts_with("failed to start"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_streaming_forwards_lines_in_order() {
        let adapter = ProcessToolAdapter::new();
        let log = Arc::new(CollectingLog::default());
        let invocation = shell("echo one >&2; echo two >&2; printf 'three\\r\\n' >&2");

        let output = adapter.run_streaming(&invocation, log.clone()).await.unwrap();

        assert!(output.success);
        assert_eq!(output.exit_code, Some(0));
        assert_eq!(log.lines(), vec!["one", "two", "three"]);
        assert_eq!(output.stderr, "one\ntwo\nthree");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_streaming_keeps_last_fifty_lines() {
        let adapter = ProcessToolAdapter::new();
        let log = Arc::new(CollectingLog::default());
        let invocation = shell("i=1; while [ $i -le 120 ]; do echo line$i >&2; i=$((i+1)); done");

        let output = adapter.run_streaming(&invocation, log.clone()).await.unwrap();

        assert_eq!(log.lines().len(), 120);
        let tail: Vec<&str> = output.stderr.lines().collect();
        assert_eq!(tail.len(), DIAGNOSTIC_TAIL_LINES);
        assert_eq!(tail.first(), Some(&"line71"));
        assert_eq!(tail.last(), Some(&"line120"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_streaming_reports_nonzero_exit() {
        let adapter = ProcessToolAdapter::new();
        let log = Arc::new(CollectingLog::default());
        let invocation = shell("echo 'Conversion failed!' >&2; exit 3");

        let output = adapter.run_streaming(&invocation, log.clone()).await.unwrap();

        assert!(!output.success);
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stderr, "Conversion failed!");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_streaming_survives_non_utf8_diagnostics() {
        let adapter = ProcessToolAdapter::new();
        let log = Arc::new(CollectingLog::default());
        let invocation = shell(
            "echo 'Input #0, matroska' >&2; printf 'title: caf\\351\\n' >&2; \
             i=0; while [ $i -lt 3000 ]; do echo after$i >&2; i=$((i+1)); done; exit 0",
        );

        let output = adapter.run_streaming(&invocation, log.clone()).await.unwrap();

        assert!(output.success);
        assert_eq!(output.exit_code, Some(0));
        let lines = log.lines();
        assert_eq!(lines.len(), 3002);
        assert_eq!(lines[1], "title: caf\u{FFFD}");
        assert_eq!(lines.last().map(String::as_str), Some("after2999"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_streaming_survives_broken_log_sink() {
        let adapter = ProcessToolAdapter::new();
        let log = Arc::new(PanickingLog {
            warnings: Mutex::new(Vec::new()),
        });
        let invocation = shell("echo only >&2");

        let output = adapter.run_streaming(&invocation, log.clone()).await.unwrap();

        assert_eq!(output.stderr, "");
        let warnings = log.warnings.lock().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Diagnostics from sh were lost"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captured_keeps_both_streams() {
        let adapter = ProcessToolAdapter::new();
        let invocation = ToolInvocation::new(
            ToolKind::Inspect,
            "sh",
            vec!["-c".to_string(), "echo '1|7.1|eng|Main'; echo warn >&2; exit 2".to_string()],
        );

        let output = adapter.run_captured(&invocation).await.unwrap();

        assert!(!output.success);
        assert_eq!(output.exit_code, Some(2));
        assert_eq!(output.stdout, "1|7.1|eng|Main\n");
        assert_eq!(output.stderr, "warn\n");
    }
}
