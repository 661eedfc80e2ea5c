use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::services::version_codec::VersionLayout;
use crate::utils::errors::{ConfigError, Result};

pub const DEFAULT_FILE: &str = "CMakeLists.txt";
pub const DEFAULT_PREFIX: &str = "META_VERSION_";
pub const DEFAULT_PADDING: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Build file holding the version variables.
    #[serde(default = "default_file")]
    pub file: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Spaces written between the variable name and the quoted value.
    #[serde(default = "default_padding")]
    pub padding: usize,
}

fn default_file() -> String { DEFAULT_FILE.to_string() }
fn default_prefix() -> String { DEFAULT_PREFIX.to_string() }
fn default_padding() -> usize { DEFAULT_PADDING }

impl Default for Config {
    fn default() -> Self {
        Self {
            file: default_file(),
            prefix: default_prefix(),
            padding: default_padding(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&contents).map_err(|e| match e {
            ConfigError::InvalidFile { reason, .. } => ConfigError::InvalidFile {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })?;

        // A relative build file is relative to the configuration file
        if let Some(dir) = path.parent() {
            if Path::new(&config.file).is_relative() && !dir.as_os_str().is_empty() {
                config.file = dir.join(&config.file).to_string_lossy().into_owned();
            }
        }

        log::debug!("Loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> std::result::Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|e| ConfigError::InvalidFile {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.padding == 0 {
            return Err(ConfigError::InvalidValue {
                field: "padding".to_string(),
                value: "0".to_string(),
            });
        }
        if self.prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "prefix".to_string(),
                value: self.prefix.clone(),
            });
        }
        if self.file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "file".to_string(),
                value: self.file.clone(),
            });
        }
        Ok(())
    }

    pub fn layout(&self) -> VersionLayout {
        VersionLayout {
            prefix: self.prefix.clone(),
            padding: self.padding,
        }
    }
}
