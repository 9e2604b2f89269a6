//! Error handling module for mkv-enhance

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum EnhanceError {
    /// Input file not found before any tool was run
    #[error("Input file not found: {path}")]
    NotFound { path: String },

    /// An external tool could not be launched or exited non-zero
    #[error("{tool} failed: {message}\nOutput:\n{output}")]
    ToolInvocation {
        tool: String,
        message: String,
        output: String,
    },

    /// A side-car file could not be removed after a successful remux
    #[error("Failed to delete temporary file {}: {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file or override is invalid
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations
pub type EnhanceResult<T> = std::result::Result<T, EnhanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_invocation_message_carries_output() {
        let err = EnhanceError::ToolInvocation {
            tool: "ffprobe".to_string(),
            message: "exit status: 1".to_string(),
            output: "movie.mkv: Invalid data found".to_string(),
        };

        let text = err.to_string();
        assert!(text.starts_with("ffprobe failed: exit status: 1"));
        assert!(text.contains("Invalid data found"));
    }

    #[test]
    fn test_cleanup_error_names_path() {
        let err = EnhanceError::Cleanup {
            path: PathBuf::from("movie_track1_enhanced.opus"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert!(err.to_string().contains("movie_track1_enhanced.opus"));
    }
}
