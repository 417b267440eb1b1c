//! ConfigLoader: composes sources and deserializes to ArborConfig.
//!
//! Precedence, lowest to highest: built-in defaults, configuration file,
//! ARBOR-prefixed environment variables with `__` separating nested keys
//! (e.g. `ARBOR_LOGGING__LEVEL=debug`).

use super::ArborConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from defaults and environment only.
    pub fn load() -> Result<ArborConfig, ConfigError> {
        let builder = with_environment(Config::builder());
        builder.build()?.try_deserialize()
    }

    /// Load configuration from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<ArborConfig, ConfigError> {
        let builder = Config::builder().add_source(File::from(path.to_path_buf()));
        let builder = with_environment(builder);
        builder.build()?.try_deserialize()
    }

    /// Create default configuration.
    pub fn default() -> ArborConfig {
        ArborConfig::default()
    }
}

/// Add the environment variable overlay to a builder.
fn with_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("ARBOR")
            .separator("__")
            .try_parsing(true),
    )
}
