//! Configuration for the region decoder.
//!
//! This module defines the configuration structures used to parameterize
//! decoding. It provides:
//! 1. **Defaults:** Baseline register-file geometry and logging filter.
//! 2. **Structures:** Hierarchical config for general, register-file, and generator settings.
//! 3. **Enums:** The partition policy applied when a SIMD width does not split into whole rows.
//!
//! Configuration is supplied as JSON (`Config::from_json` / `Config::from_file`)
//! or built with `Config::default()`.

use std::path::Path;
use std::{fs, io};

use serde::Deserialize;
use thiserror::Error;

use crate::common::MAX_REGISTER_BYTES;

/// Default configuration constants for the decoder.
mod defaults {
    use crate::common::REGISTER_BYTES;

    /// Register size in bytes (one GRF register).
    pub const REGISTER_BYTES_DEFAULT: u32 = REGISTER_BYTES;

    /// `tracing` filter directive used when neither `RUST_LOG` nor the CLI set one.
    pub const LOG_FILTER: &str = "warn";
}

/// Errors raised while loading or validating a [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config file `{path}`: {source}")]
    Io {
        /// Path that failed to open.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid JSON for [`Config`].
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The register size is zero.
    #[error("register_file.register_bytes must be non-zero")]
    ZeroRegisterBytes,

    /// The register size exceeds [`MAX_REGISTER_BYTES`].
    #[error("register_file.register_bytes {0} exceeds the maximum of {max}", max = MAX_REGISTER_BYTES)]
    RegisterBytesTooLarge(u32),
}

/// What the generator does when the SIMD width is not a multiple of the region width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum PartitionPolicy {
    /// Reject the request with `RegionError::NonExactChannelPartition`.
    #[default]
    Strict,
    /// Emit only the whole rows and drop the trailing channels.
    Truncate,
}

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General settings (logging).
    #[serde(default)]
    pub general: GeneralConfig,

    /// Register-file geometry.
    #[serde(default)]
    pub register_file: RegisterFileConfig,

    /// Address generator behaviour.
    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// Missing sections and fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON, otherwise any
    /// error from [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.validate()?;
        config.generator.register_bytes = config.register_file.register_bytes;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Checks value domains that serde cannot express.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::ZeroRegisterBytes`] if the register size is zero.
    /// * [`ConfigError::RegisterBytesTooLarge`] if it exceeds [`MAX_REGISTER_BYTES`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.register_file.register_bytes {
            0 => Err(ConfigError::ZeroRegisterBytes),
            n if n > MAX_REGISTER_BYTES => Err(ConfigError::RegisterBytesTooLarge(n)),
            _ => Ok(()),
        }
    }

    /// Returns the generator settings with the register-file geometry applied.
    pub const fn generator(&self) -> GeneratorConfig {
        GeneratorConfig {
            register_bytes: self.register_file.register_bytes,
            partition: self.generator.partition,
        }
    }
}

/// General settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// `tracing` filter directive for the CLI subscriber (e.g. `"debug"`).
    #[serde(default = "GeneralConfig::default_log_filter")]
    pub log_filter: String,
}

impl GeneralConfig {
    fn default_log_filter() -> String {
        defaults::LOG_FILTER.to_owned()
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_filter: Self::default_log_filter(),
        }
    }
}

/// Register-file geometry.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RegisterFileConfig {
    /// Register size in bytes; the cursor wraps into the next register here.
    #[serde(default = "RegisterFileConfig::default_register_bytes")]
    pub register_bytes: u32,
}

impl RegisterFileConfig {
    const fn default_register_bytes() -> u32 {
        defaults::REGISTER_BYTES_DEFAULT
    }
}

impl Default for RegisterFileConfig {
    fn default() -> Self {
        Self {
            register_bytes: Self::default_register_bytes(),
        }
    }
}

/// Settings consumed by the address generator.
///
/// `register_bytes` is taken from [`RegisterFileConfig`] when the generator
/// settings come from a [`Config`]; in JSON only `partition` is read here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GeneratorConfig {
    /// Register size in bytes.
    #[serde(skip_deserializing, default = "RegisterFileConfig::default_register_bytes")]
    pub register_bytes: u32,

    /// Handling of SIMD widths that are not a multiple of the region width.
    #[serde(default)]
    pub partition: PartitionPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            register_bytes: defaults::REGISTER_BYTES_DEFAULT,
            partition: PartitionPolicy::Strict,
        }
    }
}

impl From<&Config> for GeneratorConfig {
    fn from(config: &Config) -> Self {
        config.generator()
    }
}
