//! Configuration loading via `ortho-config`.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::seed::{DEFAULT_VOLUME_COUNT, SeedSpec};
use crate::session::DEFAULT_CONFIRM_THRESHOLD;

/// Default seed for the demo volume generator.
pub const DEFAULT_RNG_SEED: u64 = 42;

/// Sysplex selected when a session starts.
pub const DEFAULT_SYSPLEX: &str = "sysplex-1";

/// Session settings merged from defaults, configuration files, and
/// environment variables.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "VOLSCOPE",
    discovery(
        app_name = "volscope",
        env_var = "VOLSCOPE_CONFIG_PATH",
        config_file_name = "volscope.toml",
        dotfile_name = ".volscope.toml",
        project_file_name = "volscope.toml"
    )
)]
pub struct ScopeConfig {
    /// Number of demo volumes generated at startup.
    #[ortho_config(default = DEFAULT_VOLUME_COUNT)]
    pub seed_volume_count: usize,
    /// Seed for the demo volume generator. The same seed reproduces the same
    /// collection.
    #[ortho_config(default = DEFAULT_RNG_SEED)]
    pub rng_seed: u64,
    /// Bulk pattern actions moving more volumes than this need explicit
    /// confirmation.
    #[ortho_config(default = DEFAULT_CONFIRM_THRESHOLD)]
    pub confirm_threshold: usize,
    /// Id of the sysplex selected at startup.
    #[ortho_config(default = DEFAULT_SYSPLEX.to_owned())]
    pub default_sysplex: String,
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// A field holds a value the session cannot use.
    #[error("invalid configuration field: {0}")]
    InvalidField(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl ScopeConfig {
    /// Loads configuration without parsing CLI arguments. Values merge
    /// defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("volscope")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Checks values that parse but cannot drive a session. Messages name
    /// the environment variable and TOML key to fix.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] for a zero volume count or a
    /// blank default sysplex.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seed_volume_count == 0 {
            return Err(ConfigError::InvalidField(String::from(
                "seed volume count must be at least 1: set VOLSCOPE_SEED_VOLUME_COUNT \
                 or seed_volume_count in volscope.toml",
            )));
        }
        if self.default_sysplex.trim().is_empty() {
            return Err(ConfigError::InvalidField(String::from(
                "default sysplex must not be blank: set VOLSCOPE_DEFAULT_SYSPLEX \
                 or default_sysplex in volscope.toml",
            )));
        }
        Ok(())
    }

    /// Seed parameters for the demo volume generator.
    #[must_use]
    pub const fn seed_spec(&self) -> SeedSpec {
        SeedSpec {
            volume_count: self.seed_volume_count,
            rng_seed: self.rng_seed,
        }
    }
}
