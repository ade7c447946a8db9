use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Resource type used when `--resource-type` is not given.
    pub resource_type: String,
    /// Read filter input as JSON5 instead of strict JSON.
    pub json5: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            resource_type: "Resource".to_string(),
            json5: false,
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<TranslatorConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<TranslatorConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<TranslatorConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn default_config() -> &'static TranslatorConfig {
    static DEFAULT_CONFIG: LazyLock<TranslatorConfig> = LazyLock::new(TranslatorConfig::default);
    &DEFAULT_CONFIG
}
