//! ConceptNode — a state vector that fires on similar input.
//!
//! A node compares input against its own state with cosine similarity,
//! rescaled to [0, 1]:
//!
//! ```text
//! activation = (cos(state, input) + 1) / 2
//! active     = activation >= threshold
//! ```
//!
//! Aligned input gives 1.0, orthogonal input 0.5, opposite input 0.0. An
//! all-zero state or input has no direction and gives 0.0.
//!
//! Edges live in the node's own table but point at arena handles; wiring
//! and propagation go through [`ConceptNetwork`](crate::network::ConceptNetwork).

use std::fmt;

use crate::config::NodeConfig;
use crate::error::{NoesisError, Result};
use crate::types::{Edge, NodeId};
use crate::vector;

/// A concept in the network.
#[derive(Debug, Clone)]
pub struct ConceptNode {
    identifier: String,
    state: Vec<f64>,
    /// Outgoing edges, in first-insertion order, at most one per target.
    connections: Vec<Edge>,
    activation_level: f64,
    activation_threshold: f64,
    is_active: bool,
}

impl ConceptNode {
    /// Create a node with an all-zero state of `config.dimension` components.
    pub fn new(identifier: impl Into<String>, config: &NodeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            identifier: identifier.into(),
            state: vec![0.0; config.dimension],
            connections: Vec::new(),
            activation_level: 0.0,
            activation_threshold: config.activation_threshold,
            is_active: false,
        })
    }

    /// Create a node with an explicit initial state.
    ///
    /// The state is taken as given (not normalized); its length must equal
    /// `config.dimension` and every component must be finite.
    pub fn with_state(
        identifier: impl Into<String>,
        state: Vec<f64>,
        config: &NodeConfig,
    ) -> Result<Self> {
        let mut node = Self::new(identifier, config)?;
        node.check_dimension(&state)?;
        check_finite(&state)?;
        node.state = state;
        Ok(node)
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn state(&self) -> &[f64] {
        &self.state
    }

    pub fn dimension(&self) -> usize {
        self.state.len()
    }

    /// Last computed activation, always in [0, 1].
    pub fn activation_level(&self) -> f64 {
        self.activation_level
    }

    pub fn activation_threshold(&self) -> f64 {
        self.activation_threshold
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Outgoing edges in traversal order.
    pub fn connections(&self) -> &[Edge] {
        &self.connections
    }

    /// Weight of the edge to `target`, if one exists.
    pub fn weight_to(&self, target: NodeId) -> Option<f64> {
        self.connections
            .iter()
            .find(|e| e.target == target)
            .map(|e| e.weight)
    }

    /// Insert or replace the edge to `target`. A replaced edge keeps its
    /// position in traversal order. Returns the previous weight.
    pub(crate) fn connect(&mut self, target: NodeId, weight: f64) -> Option<f64> {
        match self.connections.iter_mut().find(|e| e.target == target) {
            Some(edge) => Some(std::mem::replace(&mut edge.weight, weight)),
            None => {
                self.connections.push(Edge { target, weight });
                None
            }
        }
    }

    /// Activate the node against `input` and return the new activation level.
    ///
    /// Fails with `DimensionMismatch` before touching any field when the
    /// input length differs from the state's.
    pub fn activate(&mut self, input: &[f64]) -> Result<f64> {
        self.check_dimension(input)?;

        self.activation_level = if vector::is_zero(&self.state) || vector::is_zero(input) {
            0.0
        } else {
            // None only for NaN or infinite input; treat as degenerate.
            vector::normalized_similarity(&self.state, input).unwrap_or(0.0)
        };
        self.is_active = self.activation_level >= self.activation_threshold;

        tracing::trace!(
            node = %self.identifier,
            activation = self.activation_level,
            active = self.is_active,
            "activated"
        );
        Ok(self.activation_level)
    }

    /// The signal this node sends along an edge of `weight`:
    /// `state * activation_level * weight`.
    pub fn propagation_signal(&self, weight: f64) -> Vec<f64> {
        vector::scaled(&self.state, self.activation_level * weight)
    }

    /// Move the state toward `input`.
    ///
    /// `state = (1 - rate) * state + rate * normalize(input)`, then the
    /// state is renormalized unless it came out all-zero. An all-zero input
    /// leaves the state untouched. Rates outside [0, 1] extrapolate beyond
    /// the old state or the input and are allowed on purpose; only
    /// non-finite rates are rejected.
    ///
    /// Input with a NaN or infinite component fails with
    /// `NonFiniteComponent`, and a rate so large that the blend overflows
    /// fails with `InvalidConfig`. Nothing is mutated on any error.
    pub fn update_state(&mut self, input: &[f64], learning_rate: f64) -> Result<()> {
        self.check_dimension(input)?;
        if !learning_rate.is_finite() {
            return Err(NoesisError::invalid_config(
                "learning_rate",
                learning_rate.to_string(),
                "must be finite",
            ));
        }
        check_finite(input)?;
        if vector::is_zero(input) {
            return Ok(());
        }

        let target = vector::l2_normalized(input);
        let mut blended: Vec<f64> = self
            .state
            .iter()
            .zip(target.iter())
            .map(|(s, t)| (1.0 - learning_rate) * s + learning_rate * t)
            .collect();
        if vector::first_non_finite(&blended).is_some() {
            return Err(NoesisError::invalid_config(
                "learning_rate",
                learning_rate.to_string(),
                "overflows the state",
            ));
        }
        vector::l2_normalize(&mut blended);
        self.state = blended;

        tracing::trace!(node = %self.identifier, learning_rate, "state updated");
        Ok(())
    }

    fn check_dimension(&self, input: &[f64]) -> Result<()> {
        if input.len() != self.state.len() {
            return Err(NoesisError::dimension_mismatch(self.state.len(), input.len()));
        }
        Ok(())
    }
}

fn check_finite(v: &[f64]) -> Result<()> {
    match vector::first_non_finite(v) {
        Some((index, value)) => Err(NoesisError::non_finite_component(index, value)),
        None => Ok(()),
    }
}

impl fmt::Display for ConceptNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node(id={}, active={}, activation={:.2}, connections={})",
            self.identifier,
            self.is_active,
            self.activation_level,
            self.connections.len()
        )
    }
}
