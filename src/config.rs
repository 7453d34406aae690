//! Configuration System
//!
//! Layered configuration for graph operation commands: built-in defaults, the
//! user-level config file, workspace config files, then `GRAPHBATCH__*`
//! environment variables. CLI flags override the result at the call site.

use crate::logging::LoggingConfig;
use crate::service::MemoryServiceOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphbatchConfig {
    /// Completion tracker tunables
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Defaults for per-command options
    #[serde(default)]
    pub defaults: CommandDefaults,

    /// In-process graph service behaviour
    #[serde(default)]
    pub service: ServiceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Attempt budget for bounded and time-boxed waits
    #[serde(default = "default_loops")]
    pub loops: u32,

    /// Poll interval in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_loops() -> u32 {
    10
}

fn default_interval_ms() -> u64 {
    500
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            loops: default_loops(),
            interval_ms: default_interval_ms(),
        }
    }
}

impl TrackerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.loops == 0 {
            return Err("loops must be at least 1".to_string());
        }
        if self.interval_ms == 0 {
            return Err("interval_ms must be at least 1".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDefaults {
    /// Negative waits indefinitely, zero does not wait, positive is a limit in seconds
    #[serde(default = "default_wait_secs")]
    pub wait_secs: i64,

    #[serde(default)]
    pub report: bool,

    #[serde(default)]
    pub ordered: bool,
}

fn default_wait_secs() -> i64 {
    -1
}

impl Default for CommandDefaults {
    fn default() -> Self {
        Self {
            wait_secs: default_wait_secs(),
            report: false,
            ordered: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Polls before a submitted request turns terminal (0 never completes)
    #[serde(default = "default_steps_to_complete")]
    pub steps_to_complete: u32,

    #[serde(default = "default_true")]
    pub cancellable: bool,

    /// Types the service refuses to operate on
    #[serde(default)]
    pub protected_types: BTreeSet<String>,
}

fn default_steps_to_complete() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            steps_to_complete: default_steps_to_complete(),
            cancellable: default_true(),
            protected_types: BTreeSet::new(),
        }
    }
}

impl ServiceConfig {
    pub fn to_memory_options(&self) -> MemoryServiceOptions {
        MemoryServiceOptions {
            steps_to_complete: self.steps_to_complete,
            cancellable: self.cancellable,
            protected_types: self.protected_types.clone(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Tracker(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Tracker(msg) => write!(f, "Tracker: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl GraphbatchConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.tracker.validate() {
            errors.push(ValidationError::Tracker(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
