//! Shared types for concept networks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Weight used when a connection is made without an explicit one.
pub const DEFAULT_CONNECTION_WEIGHT: f64 = 1.0;

/// Stable handle to a node inside a [`ConceptNetwork`](crate::network::ConceptNetwork).
///
/// Handles are arena indices. Nodes are never removed, so a handle stays
/// valid for the lifetime of the network that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in its network's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A directed, weighted edge stored in the source node's edge table.
///
/// The edge does not own its target; the handle is resolved through the
/// network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub target: NodeId,
    /// Unbounded: negative and >1 weights are the caller's business.
    pub weight: f64,
}

/// Read-only view of an outgoing connection, with the target's identifier
/// resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection<'a> {
    pub target: NodeId,
    pub identifier: &'a str,
    pub weight: f64,
}

/// Serializable copy of one node's observable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub identifier: String,
    pub state: Vec<f64>,
    pub activation_level: f64,
    pub activation_threshold: f64,
    pub is_active: bool,
    /// (target identifier, weight) in traversal order.
    pub connections: Vec<(String, f64)>,
}

/// Serializable copy of a whole network, nodes in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub nodes: Vec<NodeSnapshot>,
}

impl NetworkSnapshot {
    pub fn node(&self, identifier: &str) -> Option<&NodeSnapshot> {
        self.nodes.iter().find(|n| n.identifier == identifier)
    }

    /// Identifiers of active nodes, in insertion order.
    pub fn active(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| n.is_active)
            .map(|n| n.identifier.as_str())
            .collect()
    }

    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
