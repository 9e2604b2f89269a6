// TOML config adapter - Reads optional settings files

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{EnhanceError, EnhanceResult};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "mkv_enhance.toml";

/// Settings as they appear in the TOML file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub tools: ToolsSection,
    pub logging: LoggingSection,
}

/// `[tools]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsSection {
    pub ffmpeg: Option<String>,
    pub ffprobe: Option<String>,
}

/// `[logging]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub format: Option<String>,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Load an explicitly requested file; a missing file is an error
    pub fn load(path: &Path) -> EnhanceResult<FileConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| EnhanceError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        Self::parse(&content).map_err(|e| match e {
            EnhanceError::Config { message } => EnhanceError::Config {
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        })
    }

    /// Load the default file from `dir` if it exists
    pub fn load_default(dir: &Path) -> EnhanceResult<Option<(PathBuf, FileConfig)>> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let config = Self::load(&path)?;
        Ok(Some((path, config)))
    }

    /// Parse TOML text
    pub fn parse(content: &str) -> EnhanceResult<FileConfig> {
        toml::from_str(content).map_err(|e| EnhanceError::Config {
            message: format!("Failed to parse TOML config: {}", e),
        })
    }
}
