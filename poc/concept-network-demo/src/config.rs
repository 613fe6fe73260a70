//! Configuration for the demo run.

use anyhow::{Context, Result};
use noesis_core::config::{NodeConfig, DEFAULT_ACTIVATION_THRESHOLD, DEFAULT_LEARNING_RATE};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::network::CONCEPT_DIMENSION;

/// Demo configuration, read from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_threshold")]
    pub activation_threshold: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Apply the learning rule to every active concept after propagation.
    #[serde(default)]
    pub learn: bool,
}

fn default_threshold() -> f64 { DEFAULT_ACTIVATION_THRESHOLD }
fn default_learning_rate() -> f64 { DEFAULT_LEARNING_RATE }

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            activation_threshold: default_threshold(),
            learning_rate: default_learning_rate(),
        }
    }
}

impl DemoConfig {
    /// Load config from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(DemoConfig::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Generate default config as TOML string.
    pub fn default_toml() -> Result<String> {
        toml::to_string_pretty(&DemoConfig::default()).context("Failed to serialize config")
    }

    /// Take threshold and learning rate from [`NodeConfig::strict`].
    pub fn apply_strict(&mut self) {
        let strict = NodeConfig::strict();
        self.network.activation_threshold = strict.activation_threshold;
        self.network.learning_rate = strict.learning_rate;
    }

    /// Node configuration for the demo's 4-d concepts.
    pub fn node_config(&self) -> Result<NodeConfig> {
        let config = NodeConfig::with_dimension(CONCEPT_DIMENSION)
            .threshold(self.network.activation_threshold)
            .learning_rate(self.network.learning_rate);
        config.validate().context("Invalid network config")?;
        Ok(config)
    }
}
