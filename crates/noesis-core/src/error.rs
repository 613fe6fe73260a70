//! Error types for Noesis operations.
//!
//! Degenerate (all-zero) vectors are not errors: activation against one
//! yields `0.0` and learning from one is a no-op.

use thiserror::Error;

/// Result type for Noesis operations.
pub type Result<T> = std::result::Result<T, NoesisError>;

/// Errors that can occur while building or driving a concept network.
#[derive(Debug, Error)]
pub enum NoesisError {
    /// An input vector does not match the node's configured dimension.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A handle or identifier that the network does not own.
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// A state or input vector with a NaN or infinite component.
    #[error("Non-finite component at index {index}: {value}")]
    NonFiniteComponent { index: usize, value: f64 },

    /// A second node was registered under an existing identifier.
    #[error("Duplicate node: {0}")]
    DuplicateNode(String),

    /// A configuration value that cannot describe a node.
    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Convenience constructors
impl NoesisError {
    pub fn dimension_mismatch(expected: usize, got: usize) -> Self {
        NoesisError::DimensionMismatch { expected, got }
    }

    pub fn non_finite_component(index: usize, value: f64) -> Self {
        NoesisError::NonFiniteComponent { index, value }
    }

    pub fn node_not_found(id: impl Into<String>) -> Self {
        NoesisError::NodeNotFound(id.into())
    }

    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        NoesisError::InvalidConfig {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
