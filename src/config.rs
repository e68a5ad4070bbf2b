//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration.

use crate::core::StateId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("max_history must be greater than zero")]
    ZeroHistory,
}

/// Construction-time settings of an [`Engine`](crate::engine::Engine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_initial_state")]
    pub initial_state: StateId,

    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Label used in trace output. Generated when absent.
    #[serde(default)]
    pub instance_name: Option<String>,
}

fn default_initial_state() -> StateId {
    StateId::from("idle")
}

fn default_max_history() -> usize {
    1000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_state: default_initial_state(),
            max_history: default_max_history(),
            instance_name: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history == 0 {
            return Err(ConfigError::ZeroHistory);
        }
        Ok(())
    }
}
