use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the per-directory config file picked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "md2h.toml";

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub page: PageConfig,
    pub reading: ReadingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub lang: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            lang: "zh-CN".to_string(),
        }
    }
}

/// Starting values of the reading-settings panel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReadingConfig {
    pub font_size: u32,
    pub line_height: f32,
    pub letter_spacing: f32,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            font_size: 16,
            line_height: 1.6,
            letter_spacing: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extension: "html".to_string(),
        }
    }
}

impl Config {
    /// The config embedded at build time (`src/default_config.toml`).
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file. Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from `path` if it exists, otherwise fall back to the compiled default.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            log::debug!("Loading config from {}", path.display());
            Self::load(path)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Self::compiled_default())
        }
    }
}
