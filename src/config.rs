use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults;
use crate::error::{Result, VadSplitError};
use crate::segmenter::EngineConfig;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub server: ServerConfig,
    pub decoder: DecoderConfig,
}

/// HTTP endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
}

/// External transcoder configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecoderConfig {
    pub ffmpeg_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: defaults::LISTEN_ADDR.to_string(),
        }
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: defaults::FFMPEG_BIN.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file is missing or contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VadSplitError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                VadSplitError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only falls back to defaults when the file is missing; invalid TOML
    /// is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(VadSplitError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - VADSPLIT_LISTEN → server.listen
    /// - VADSPLIT_FFMPEG → decoder.ffmpeg_path
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(listen) = std::env::var("VADSPLIT_LISTEN")
            && !listen.is_empty()
        {
            self.server.listen = listen;
        }

        if let Ok(ffmpeg) = std::env::var("VADSPLIT_FFMPEG")
            && !ffmpeg.is_empty()
        {
            self.decoder.ffmpeg_path = ffmpeg;
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/vadsplit/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .expect("Could not determine config directory")
            .join("vadsplit")
            .join("config.toml")
    }
}
