//! Command-line argument definitions

use clap::Args;

/// External tool overrides
#[derive(Args, Debug, Default, Clone)]
pub struct ToolArgs {
    /// ffmpeg binary used for transcode and remux
    #[arg(long, value_name = "PATH")]
    pub ffmpeg: Option<String>,

    /// ffprobe binary used to list audio tracks
    #[arg(long, value_name = "PATH")]
    pub ffprobe: Option<String>,
}

/// Logging overrides
#[derive(Args, Debug, Default, Clone)]
pub struct LogArgs {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log output format (pretty, compact, json)
    #[arg(long)]
    pub log_format: Option<String>,
}
