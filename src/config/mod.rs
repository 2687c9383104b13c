//! # Configuration
//!
//! Layered configuration for the publish workflow, its event fan-out and
//! logging. Every field has a default, so an empty or missing file is valid.
//!
//! ## Sources, lowest precedence first
//!
//! 1. Built-in defaults
//! 2. `draft-publish.{toml,yaml,json}` in the configuration directory
//! 3. `draft-publish-{environment}.{toml,yaml,json}` in the same directory
//! 4. Environment variables: `DRAFT_PUBLISH__<SECTION>__<FIELD>`
//!
//! ```rust,no_run
//! use draft_publish::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let single_flight = manager.config().publish.single_flight;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::system;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DraftPublishConfig {
    pub publish: PublishConfig,
    pub events: EventConfig,
    pub logging: LoggingConfig,
}

/// Publish workflow behavior
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Reject a publish while another one is running on the same draft
    pub single_flight: bool,
    /// Deadline for readiness resolution; 0 disables it
    pub resolve_timeout_ms: u64,
    /// Deadline for the save; 0 disables it
    pub save_timeout_ms: u64,
}

impl PublishConfig {
    pub fn resolve_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.resolve_timeout_ms)
    }

    pub fn save_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.save_timeout_ms)
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            single_flight: false,
            resolve_timeout_ms: system::DEFAULT_RESOLVE_TIMEOUT_MS,
            save_timeout_ms: system::DEFAULT_SAVE_TIMEOUT_MS,
        }
    }
}

fn non_zero_millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// Lifecycle event fan-out
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EventConfig {
    /// Capacity of the broadcast channel behind `LifecyclePublisher`
    pub broadcast_capacity: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: system::DEFAULT_BROADCAST_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `draft_publish=debug`.
    /// Unset means the environment's default level.
    pub level: Option<String>,
    pub format: LogFormat,
}

impl DraftPublishConfig {
    /// Check values that deserialize fine but cannot be used
    pub fn validate(&self) -> ConfigResult<()> {
        if self.events.broadcast_capacity == 0 {
            return Err(ConfigurationError::invalid_value(
                "events.broadcast_capacity",
                "0",
                "broadcast channel capacity must be greater than zero",
            ));
        }

        if let Some(level) = &self.logging.level {
            tracing_subscriber::EnvFilter::try_new(level).map_err(|e| {
                ConfigurationError::invalid_value("logging.level", level, e.to_string())
            })?;
        }

        Ok(())
    }
}
