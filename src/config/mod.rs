//! Layered configuration: defaults, optional file, ARBOR_* environment.

mod loader;

pub use loader::ConfigLoader;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration for the namespace engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArborConfig {
    /// Structured logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}
