//! Configuration file reading.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::models::DocsConfig;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Reader for configuration files.
pub struct ConfigReader;

impl ConfigReader {
    /// Read and parse a configuration file, choosing the format by extension.
    pub fn read(path: impl AsRef<Path>) -> ConfigResult<DocsConfig> {
        let path = path.as_ref();
        debug!("Reading configuration from {:?}", path);

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;

        let content = fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Parse configuration content in the given format.
    ///
    /// Fails when a name cannot be used in an output file name.
    pub fn parse(content: &str, format: ConfigFormat) -> ConfigResult<DocsConfig> {
        let config: DocsConfig = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        config.check_file_names()?;
        Ok(config)
    }
}
