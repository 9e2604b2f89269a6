// Ports - Interface definitions (contracts)

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{EnhanceError, EnhanceResult};

/// Which external collaborator an invocation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// Audio stream listing (ffprobe)
    Inspect,
    /// Per-track downmix encode (ffmpeg)
    Transcode,
    /// Final container assembly (ffmpeg)
    Mux,
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ToolKind::Inspect => "inspect",
            ToolKind::Transcode => "transcode",
            ToolKind::Mux => "mux",
        };
        f.write_str(name)
    }
}

/// A single external process call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub kind: ToolKind,
    pub program: String,
    pub args: Vec<String>,
    /// Free-form label attached to forwarded diagnostic lines
    pub context: String,
}

impl ToolInvocation {
    pub fn new(kind: ToolKind, program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            kind,
            program: program.into(),
            args,
            context: String::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Last argument, which is the output path for transcode and mux calls
    pub fn output_arg(&self) -> Option<&str> {
        self.args.last().map(String::as_str)
    }

    /// Error for a process that could not be started
    pub fn launch_error(&self, err: &std::io::Error) -> EnhanceError {
        EnhanceError::ToolInvocation {
            tool: self.program.clone(),
            message: format!("failed to start: {}", err),
            output: String::new(),
        }
    }

    /// Error for a started process whose exit status could not be collected
    pub fn wait_error(&self, err: &std::io::Error) -> EnhanceError {
        EnhanceError::ToolInvocation {
            tool: self.program.clone(),
            message: format!("failed to wait: {}", err),
            output: String::new(),
        }
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Exit status and captured text of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    /// None when the process was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// A successful run with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed run with the given exit code and stderr
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// stdout followed by stderr
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        if !text.is_empty() && !self.stderr.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&self.stderr);
        text
    }

    /// Turn a non-zero exit into `ToolInvocation`, keeping `diagnostics` as the message body
    pub fn check(self, invocation: &ToolInvocation, diagnostics: String) -> EnhanceResult<Self> {
        if self.success {
            return Ok(self);
        }
        let status = match self.exit_code {
            Some(code) => format!("exit status: {}", code),
            None => "terminated by signal".to_string(),
        };
        Err(EnhanceError::ToolInvocation {
            tool: invocation.program.clone(),
            message: status,
            output: diagnostics,
        })
    }
}

/// Port for running external media tools
#[async_trait]
pub trait ToolPort: Send + Sync {
    /// Run to completion, capturing stdout and stderr.
    ///
    /// Returns `Err` only when the process cannot be started; a non-zero exit
    /// comes back as `ToolOutput { success: false, .. }`.
    async fn run_captured(&self, invocation: &ToolInvocation) -> EnhanceResult<ToolOutput>;

    /// Run to completion, forwarding each stderr line to `log` as it arrives
    async fn run_streaming(
        &self,
        invocation: &ToolInvocation,
        log: Arc<dyn LogPort>,
    ) -> EnhanceResult<ToolOutput>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, path: &Path) -> bool;

    /// Delete file
    async fn remove_file(&self, path: &Path) -> std::io::Result<()>;
}

/// Port for logging and observability
#[async_trait]
pub trait LogPort: Send + Sync {
    async fn info(&self, message: &str);

    async fn warn(&self, message: &str);

    async fn error(&self, message: &str);

    async fn debug(&self, message: &str);

    /// One diagnostic line from an external tool
    async fn tool_line(&self, kind: ToolKind, context: &str, line: &str);
}
