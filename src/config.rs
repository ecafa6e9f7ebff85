//! Configuration loading via `ortho-config`.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::repository::{StoreError, VolumeSpec};
use crate::volume::{BYTES_PER_GIB, IoPriority, VolumeFormat};

/// Client configuration derived from environment variables, configuration
/// files, and CLI flags.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(prefix = "BASALT")]
pub struct ClientConfig {
    /// Path of the sandbox catalog file holding the registry snapshot.
    #[ortho_config(default = ".basalt/volumes.json".to_owned())]
    pub catalog_path: String,
    /// Capacity for new plain volumes, in GiB.
    #[ortho_config(default = 1)]
    pub default_size_gb: u32,
    /// Filesystem format for new volumes (`xfs`, `ext4`, or `none`).
    #[ortho_config(default = "xfs".to_owned())]
    pub default_format: String,
    /// Replication factor for new volumes.
    #[ortho_config(default = 1)]
    pub default_ha_level: u32,
    /// I/O priority for new volumes (`none`, `low`, `medium`, or `high`).
    #[ortho_config(default = "none".to_owned())]
    pub default_io_priority: String,
}

impl ClientConfig {
    /// Loads configuration without attempting to parse CLI arguments.
    /// Values merge defaults, configuration files, and environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("basalt")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Performs semantic validation on the configured values. Error
    /// messages include guidance on how to correct them via environment
    /// variables or configuration files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a value cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.format()?;
        self.io_priority()?;
        if self.default_size_gb == 0 {
            return Err(ConfigError::InvalidValue(String::from(
                "default volume size must be at least 1 GiB: set BASALT_DEFAULT_SIZE_GB or \
                 default_size_gb in basalt.toml",
            )));
        }
        if self.catalog_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue(String::from(
                "missing catalog path: set BASALT_CATALOG_PATH or catalog_path in basalt.toml",
            )));
        }
        Ok(())
    }

    /// Returns the configured filesystem format.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unknown labels.
    pub fn format(&self) -> Result<VolumeFormat, ConfigError> {
        VolumeFormat::from_label(&self.default_format).ok_or_else(|| {
            ConfigError::InvalidValue(format!(
                "unknown volume format '{}': set BASALT_DEFAULT_FORMAT or default_format in \
                 basalt.toml to xfs, ext4, or none",
                self.default_format
            ))
        })
    }

    /// Returns the configured I/O priority.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unknown labels.
    pub fn io_priority(&self) -> Result<IoPriority, ConfigError> {
        IoPriority::from_label(&self.default_io_priority).ok_or_else(|| {
            ConfigError::InvalidValue(format!(
                "unknown IO priority '{}': set BASALT_DEFAULT_IO_PRIORITY or \
                 default_io_priority in basalt.toml to none, low, medium, or high",
                self.default_io_priority
            ))
        })
    }

    /// Returns the configured default capacity in bytes.
    #[must_use]
    pub fn default_size_bytes(&self) -> u64 {
        u64::from(self.default_size_gb) * BYTES_PER_GIB
    }

    /// Builds a plain-volume spec for the given name using the configured
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails.
    pub fn default_spec(&self, name: &str) -> Result<VolumeSpec, ConfigError> {
        self.validate()?;
        VolumeSpec::builder()
            .name(name)
            .size_bytes(self.default_size_bytes())
            .format(self.format()?)
            .ha_level(self.default_ha_level)
            .io_priority(self.io_priority()?)
            .build()
            .map_err(ConfigError::from)
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a configured value cannot be used.
    #[error("invalid configuration value: {0}")]
    InvalidValue(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}

impl From<StoreError> for ConfigError {
    fn from(value: StoreError) -> Self {
        Self::InvalidValue(value.to_string())
    }
}
