//! Node configuration.
//!
//! Every field has a serde default so a partial TOML/JSON table is enough
//! to override a single value.

use serde::{Deserialize, Serialize};

use crate::error::{NoesisError, Result};

/// Default dimensionality of a concept state vector.
pub const DEFAULT_DIMENSION: usize = 128;

/// Default activation threshold.
pub const DEFAULT_ACTIVATION_THRESHOLD: f64 = 0.5;

/// Default learning rate for [`ConceptNode::update_state`](crate::node::ConceptNode::update_state).
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Construction parameters for a concept node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Length of the state vector, fixed for the node's lifetime.
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    /// Activation level at or above which the node counts as active.
    /// Any finite value is accepted: above 1.0 the node can never fire,
    /// at or below 0.0 it fires on every activation.
    #[serde(default = "default_activation_threshold")]
    pub activation_threshold: f64,

    /// Learning rate callers use when they do not pick one per call.
    /// Values outside [0, 1] extrapolate past the input and are allowed.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

fn default_dimension() -> usize { DEFAULT_DIMENSION }
fn default_activation_threshold() -> f64 { DEFAULT_ACTIVATION_THRESHOLD }
fn default_learning_rate() -> f64 { DEFAULT_LEARNING_RATE }

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            dimension: default_dimension(),
            activation_threshold: default_activation_threshold(),
            learning_rate: default_learning_rate(),
        }
    }
}

impl NodeConfig {
    /// Default configuration with a custom dimension.
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension,
            ..Self::default()
        }
    }

    pub fn threshold(mut self, activation_threshold: f64) -> Self {
        self.activation_threshold = activation_threshold;
        self
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// A configuration that only fires on near-identical input
    /// (cosine of at least 0.98) and learns slowly.
    pub fn strict() -> Self {
        Self {
            activation_threshold: 0.99,
            learning_rate: 0.05,
            ..Self::default()
        }
    }

    /// Reject values that cannot describe a node.
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(NoesisError::invalid_config(
                "dimension",
                "0",
                "must be at least 1",
            ));
        }
        if !self.activation_threshold.is_finite() {
            return Err(NoesisError::invalid_config(
                "activation_threshold",
                self.activation_threshold.to_string(),
                "must be finite",
            ));
        }
        if !self.learning_rate.is_finite() {
            return Err(NoesisError::invalid_config(
                "learning_rate",
                self.learning_rate.to_string(),
                "must be finite",
            ));
        }
        Ok(())
    }
}
