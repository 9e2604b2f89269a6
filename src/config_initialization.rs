//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use crate::adapters::toml_config::{FileConfig, TomlConfigAdapter};
use crate::cli::Cli;
use crate::error::{EnhanceError, EnhanceResult};
use crate::utils::logging::LoggingConfig;

pub const ENV_FFMPEG: &str = "MKV_ENHANCE_FFMPEG";
pub const ENV_FFPROBE: &str = "MKV_ENHANCE_FFPROBE";
pub const ENV_LOG_LEVEL: &str = "MKV_ENHANCE_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "MKV_ENHANCE_LOG_FORMAT";

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub ffmpeg: String,
    pub ffprobe: String,
    pub logging: LoggingConfig,
    /// File the settings were read from, if any
    pub source_file: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
            logging: LoggingConfig::default(),
            source_file: None,
        }
    }
}

/// Layer of raw string overrides, applied on top of lower layers
#[derive(Debug, Clone, Default)]
struct Overrides {
    ffmpeg: Option<String>,
    ffprobe: Option<String>,
    log_level: Option<String>,
    log_format: Option<String>,
}

impl Overrides {
    fn from_file(file: FileConfig) -> Self {
        Self {
            ffmpeg: file.tools.ffmpeg,
            ffprobe: file.tools.ffprobe,
            log_level: file.logging.level,
            log_format: file.logging.format,
        }
    }

    fn from_env<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            ffmpeg: lookup(ENV_FFMPEG),
            ffprobe: lookup(ENV_FFPROBE),
            log_level: lookup(ENV_LOG_LEVEL),
            log_format: lookup(ENV_LOG_FORMAT),
        }
    }

    fn from_cli(cli: &Cli) -> Self {
        Self {
            ffmpeg: cli.tools.ffmpeg.clone(),
            ffprobe: cli.tools.ffprobe.clone(),
            log_level: cli.logging.log_level.clone(),
            log_format: cli.logging.log_format.clone(),
        }
    }

    fn apply(self, config: &mut PipelineConfig) -> EnhanceResult<()> {
        if let Some(ffmpeg) = self.ffmpeg {
            config.ffmpeg = non_empty("ffmpeg", ffmpeg)?;
        }
        if let Some(ffprobe) = self.ffprobe {
            config.ffprobe = non_empty("ffprobe", ffprobe)?;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level.parse()?;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format.parse()?;
        }
        Ok(())
    }
}

fn non_empty(key: &str, value: String) -> EnhanceResult<String> {
    if value.trim().is_empty() {
        return Err(EnhanceError::Config {
            message: format!("{} path must not be empty", key),
        });
    }
    Ok(value)
}

/// Resolve settings with precedence CLI > Env > File > Defaults
pub fn initialize_configuration(cli: &Cli) -> EnhanceResult<PipelineConfig> {
    let cwd = std::env::current_dir()?;
    resolve_configuration(cli, &cwd, |key| std::env::var(key).ok())
}

/// Same as [`initialize_configuration`] with an explicit working directory and environment
pub fn resolve_configuration<F>(cli: &Cli, cwd: &Path, env: F) -> EnhanceResult<PipelineConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = PipelineConfig::default();

    let file = match &cli.config {
        Some(path) => Some((path.clone(), TomlConfigAdapter::load(path)?)),
        None => TomlConfigAdapter::load_default(cwd)?,
    };
    if let Some((path, file_config)) = file {
        Overrides::from_file(file_config).apply(&mut config)?;
        config.source_file = Some(path);
    }

    Overrides::from_env(env).apply(&mut config)?;
    Overrides::from_cli(cli).apply(&mut config)?;

    Ok(config)
}
