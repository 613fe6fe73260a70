//! ConceptNetwork — the arena that owns concept nodes.
//!
//! Nodes reference each other through [`NodeId`] handles stored in their
//! edge tables, so cycles and self-loops need no shared ownership. The
//! network resolves handles and keeps an identifier index for lookup.
//!
//! Propagation is single-hop. Spreading activation further is up to the
//! caller, who decides which of the returned nodes to propagate next:
//!
//! ```rust
//! use noesis_core::prelude::*;
//!
//! # fn main() -> noesis_core::error::Result<()> {
//! let config = NodeConfig::with_dimension(2);
//! let mut net = ConceptNetwork::new();
//! let a = net.add_concept("a", vec![1.0, 0.0], &config)?;
//! let b = net.add_concept("b", vec![0.9, 0.1], &config)?;
//! net.connect(a, b, 0.8)?;
//!
//! net.activate(a, &[1.0, 0.0])?;
//! let fired = net.propagate(a)?;
//! assert_eq!(fired, vec![b]);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use crate::config::NodeConfig;
use crate::error::{NoesisError, Result};
use crate::node::ConceptNode;
use crate::types::{
    Connection, NetworkSnapshot, NodeId, NodeSnapshot, DEFAULT_CONNECTION_WEIGHT,
};

/// Arena of concept nodes addressed by stable handles.
#[derive(Debug, Clone, Default)]
pub struct ConceptNetwork {
    nodes: Vec<ConceptNode>,
    /// Identifier to handle, for O(1) lookup by name.
    index: HashMap<String, NodeId>,
}

impl ConceptNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `node` and return its handle.
    ///
    /// Identifiers are unique within a network; a second node with the
    /// same identifier is rejected.
    pub fn add_node(&mut self, node: ConceptNode) -> Result<NodeId> {
        if self.index.contains_key(node.identifier()) {
            return Err(NoesisError::DuplicateNode(node.identifier().to_string()));
        }
        let id = NodeId(self.nodes.len());
        tracing::debug!(
            node = %node.identifier(),
            id = %id,
            dimension = node.dimension(),
            threshold = node.activation_threshold(),
            "node added"
        );
        self.index.insert(node.identifier().to_string(), id);
        self.nodes.push(node);
        Ok(id)
    }

    /// Build a node from `state` and `config` and add it.
    pub fn add_concept(
        &mut self,
        identifier: impl Into<String>,
        state: Vec<f64>,
        config: &NodeConfig,
    ) -> Result<NodeId> {
        self.add_node(ConceptNode::with_state(identifier, state, config)?)
    }

    pub fn id_of(&self, identifier: &str) -> Option<NodeId> {
        self.index.get(identifier).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&ConceptNode> {
        self.nodes.get(id.0)
    }

    /// Mutable access for driving a node directly (activate, update_state).
    /// Edges can only be changed through [`connect`](Self::connect).
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut ConceptNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn node_by_identifier(&self, identifier: &str) -> Option<&ConceptNode> {
        self.id_of(identifier).and_then(|id| self.node(id))
    }

    /// All nodes with their handles, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &ConceptNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.connections().len()).sum()
    }

    /// Record a directed edge `source -> target` with `weight`.
    ///
    /// Connecting the same pair again replaces the weight. Weights are not
    /// range-checked and self-loops are allowed. Nodes of different
    /// dimensions may be connected; the mismatch surfaces on `propagate`.
    pub fn connect(&mut self, source: NodeId, target: NodeId, weight: f64) -> Result<()> {
        self.get(target)?;
        let node = self.get_mut(source)?;
        let previous = node.connect(target, weight);

        match previous {
            Some(old) => tracing::debug!(
                source = %node.identifier(),
                target = %target,
                old_weight = old,
                weight,
                "connection replaced"
            ),
            None => tracing::debug!(
                source = %node.identifier(),
                target = %target,
                weight,
                "connection added"
            ),
        }
        Ok(())
    }

    /// [`connect`](Self::connect) with [`DEFAULT_CONNECTION_WEIGHT`].
    pub fn connect_default(&mut self, source: NodeId, target: NodeId) -> Result<()> {
        self.connect(source, target, DEFAULT_CONNECTION_WEIGHT)
    }

    /// Outgoing connections of `id` with target identifiers resolved.
    pub fn connections(&self, id: NodeId) -> Result<Vec<Connection<'_>>> {
        let node = self.get(id)?;
        Ok(node
            .connections()
            .iter()
            .map(|edge| Connection {
                target: edge.target,
                identifier: self.nodes[edge.target.0].identifier(),
                weight: edge.weight,
            })
            .collect())
    }

    /// Activate one node against `input`. Neighbors are not touched.
    pub fn activate(&mut self, id: NodeId, input: &[f64]) -> Result<f64> {
        self.get_mut(id)?.activate(input)
    }

    /// Push activation one hop along every outgoing edge of `source`.
    ///
    /// An inactive source does nothing and returns an empty list. An
    /// active source sends `state * activation_level * weight` to each
    /// target in traversal order; the signal is computed per edge from the
    /// source's current values, so a self-loop earlier in the table is
    /// seen by later edges. Returns the targets that are active after
    /// their activation, in traversal order (a target reached by a
    /// self-loop included).
    ///
    /// A failing target activation is returned as-is; edges processed
    /// before it keep their effect.
    pub fn propagate(&mut self, source: NodeId) -> Result<Vec<NodeId>> {
        let node = self.get(source)?;
        if !node.is_active() {
            return Ok(Vec::new());
        }

        let edges = node.connections().to_vec();
        let mut activated = Vec::new();
        for edge in &edges {
            let signal = self.nodes[source.0].propagation_signal(edge.weight);
            let target = &mut self.nodes[edge.target.0];
            if let Err(err) = target.activate(&signal) {
                tracing::warn!(
                    source = %self.nodes[source.0].identifier(),
                    target = %self.nodes[edge.target.0].identifier(),
                    error = %err,
                    "propagation aborted"
                );
                return Err(err);
            }
            if target.is_active() {
                activated.push(edge.target);
            }
        }

        tracing::debug!(
            source = %self.nodes[source.0].identifier(),
            edges = edges.len(),
            activated = activated.len(),
            "propagated"
        );
        Ok(activated)
    }

    /// Apply the learning rule to one node's state.
    pub fn update_state(&mut self, id: NodeId, input: &[f64], learning_rate: f64) -> Result<()> {
        self.get_mut(id)?.update_state(input, learning_rate)
    }

    /// Handles of currently active nodes, in insertion order.
    pub fn active_nodes(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, n)| n.is_active())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            nodes: self
                .nodes
                .iter()
                .map(|node| NodeSnapshot {
                    identifier: node.identifier().to_string(),
                    state: node.state().to_vec(),
                    activation_level: node.activation_level(),
                    activation_threshold: node.activation_threshold(),
                    is_active: node.is_active(),
                    connections: node
                        .connections()
                        .iter()
                        .map(|e| (self.nodes[e.target.0].identifier().to_string(), e.weight))
                        .collect(),
                })
                .collect(),
        }
    }

    fn get(&self, id: NodeId) -> Result<&ConceptNode> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| NoesisError::node_not_found(id.to_string()))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut ConceptNode> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| NoesisError::node_not_found(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn config(dimension: usize) -> NodeConfig {
        NodeConfig::with_dimension(dimension)
    }

    #[test]
    fn add_and_lookup() {
        let mut net = ConceptNetwork::new();
        let a = net.add_concept("a", vec![1.0, 0.0], &config(2)).unwrap();
        let b = net.add_node(ConceptNode::new("b", &config(2)).unwrap()).unwrap();

        assert_eq!(net.len(), 2);
        assert_eq!(net.id_of("a"), Some(a));
        assert_eq!(net.id_of("b"), Some(b));
        assert_eq!(net.id_of("c"), None);
        assert_eq!(net.node_by_identifier("a").unwrap().state(), &[1.0, 0.0]);
    }

    #[test]
    fn duplicate_identifier_rejected() {
        let mut net = ConceptNetwork::new();
        net.add_concept("a", vec![1.0], &config(1)).unwrap();
        let err = net.add_concept("a", vec![0.5], &config(1)).unwrap_err();
        assert!(matches!(err, NoesisError::DuplicateNode(ref id) if id == "a"));
        assert_eq!(net.len(), 1);
    }

    #[test]
    fn connect_with_unknown_handle_fails() {
        let mut net = ConceptNetwork::new();
        let a = net.add_concept("a", vec![1.0], &config(1)).unwrap();
        let ghost = NodeId(7);
        assert!(matches!(net.connect(a, ghost, 1.0), Err(NoesisError::NodeNotFound(_))));
        assert!(matches!(net.connect(ghost, a, 1.0), Err(NoesisError::NodeNotFound(_))));
        assert_eq!(net.edge_count(), 0);
    }

    #[test]
    fn reconnect_replaces_weight() {
        let mut net = ConceptNetwork::new();
        let a = net.add_concept("a", vec![1.0], &config(1)).unwrap();
        let b = net.add_concept("b", vec![1.0], &config(1)).unwrap();
        net.connect(a, b, 0.3).unwrap();
        net.connect(a, b, 0.6).unwrap();

        let conns = net.connections(a).unwrap();
        assert_eq!(conns.len(), 1);
        assert_eq!(conns[0].identifier, "b");
        assert_eq!(conns[0].weight, 0.6);
        // Target side is untouched.
        assert!(net.connections(b).unwrap().is_empty());
    }

    #[test]
    fn connect_default_uses_unit_weight() {
        let mut net = ConceptNetwork::new();
        let a = net.add_concept("a", vec![1.0], &config(1)).unwrap();
        let b = net.add_concept("b", vec![1.0], &config(1)).unwrap();
        net.connect_default(a, b).unwrap();
        assert_eq!(net.node(a).unwrap().weight_to(b), Some(1.0));
    }

    #[test]
    fn inactive_node_propagates_nothing() {
        let mut net = ConceptNetwork::new();
        let a = net.add_concept("a", vec![1.0, 0.0], &config(2)).unwrap();
        let b = net.add_concept("b", vec![1.0, 0.0], &config(2)).unwrap();
        net.connect(a, b, 1.0).unwrap();

        assert!(net.propagate(a).unwrap().is_empty());
        assert_eq!(net.node(b).unwrap().activation_level(), 0.0);
    }

    #[test]
    fn propagation_only_reports_targets_above_threshold() {
        let mut net = ConceptNetwork::new();
        let n1 = net.add_concept("node1", vec![1.0, 0.0, 0.0, 0.0], &config(4)).unwrap();
        let n2 = net.add_concept("node2", vec![0.9, 0.1, 0.0, 0.0], &config(4)).unwrap();
        let n3 = net.add_concept("node3", vec![0.0, 1.0, 0.0, 0.0], &config(4).threshold(0.6)).unwrap();
        net.connect_default(n1, n2).unwrap();
        net.connect_default(n1, n3).unwrap();

        net.activate(n1, &[1.0, 0.0, 0.0, 0.0]).unwrap();
        let fired = net.propagate(n1).unwrap();

        assert_eq!(fired, vec![n2]);
        // node3 was still activated, just not above its threshold.
        assert!((net.node(n3).unwrap().activation_level() - 0.5).abs() < EPS);
        assert!(!net.node(n3).unwrap().is_active());
    }

    #[test]
    fn negative_weight_inverts_signal() {
        let mut net = ConceptNetwork::new();
        let a = net.add_concept("a", vec![1.0, 0.0], &config(2)).unwrap();
        let b = net.add_concept("b", vec![1.0, 0.0], &config(2)).unwrap();
        net.connect(a, b, -1.0).unwrap();

        net.activate(a, &[1.0, 0.0]).unwrap();
        assert!(net.propagate(a).unwrap().is_empty());
        assert!(net.node(b).unwrap().activation_level().abs() < EPS);
    }

    #[test]
    fn zero_weight_sends_degenerate_signal() {
        let mut net = ConceptNetwork::new();
        let a = net.add_concept("a", vec![1.0, 0.0], &config(2)).unwrap();
        let b = net.add_concept("b", vec![1.0, 0.0], &config(2)).unwrap();
        net.connect(a, b, 0.0).unwrap();

        net.activate(a, &[1.0, 0.0]).unwrap();
        assert!(net.propagate(a).unwrap().is_empty());
        assert_eq!(net.node(b).unwrap().activation_level(), 0.0);
    }

    #[test]
    fn self_loop_reactivates_source() {
        let mut net = ConceptNetwork::new();
        let a = net.add_concept("a", vec![1.0, 0.0], &config(2)).unwrap();
        net.connect(a, a, 0.5).unwrap();

        net.activate(a, &[1.0, 1.0]).unwrap();
        let fired = net.propagate(a).unwrap();

        // Signal is parallel to the state, so the self-activation is maximal.
        assert_eq!(fired, vec![a]);
        assert!((net.node(a).unwrap().activation_level() - 1.0).abs() < EPS);
    }

    #[test]
    fn self_loop_result_feeds_later_edges() {
        let mut net = ConceptNetwork::new();
        let a = net.add_concept("a", vec![1.0, 0.0], &config(2)).unwrap();
        let b = net.add_concept("b", vec![1.0, 0.0], &config(2)).unwrap();
        // Inhibitory self-loop first: drives a's activation to 0.0.
        net.connect(a, a, -1.0).unwrap();
        net.connect(a, b, 1.0).unwrap();

        net.activate(a, &[1.0, 0.0]).unwrap();
        let fired = net.propagate(a).unwrap();

        // b then receives a zero signal.
        assert!(fired.is_empty());
        assert_eq!(net.node(b).unwrap().activation_level(), 0.0);
        assert!(!net.node(a).unwrap().is_active());
    }

    #[test]
    fn propagation_is_single_hop() {
        let mut net = ConceptNetwork::new();
        let a = net.add_concept("a", vec![1.0, 0.0], &config(2)).unwrap();
        let b = net.add_concept("b", vec![1.0, 0.0], &config(2)).unwrap();
        let c = net.add_concept("c", vec![1.0, 0.0], &config(2)).unwrap();
        net.connect_default(a, b).unwrap();
        net.connect_default(b, c).unwrap();

        net.activate(a, &[1.0, 0.0]).unwrap();
        assert_eq!(net.propagate(a).unwrap(), vec![b]);
        assert_eq!(net.node(c).unwrap().activation_level(), 0.0);

        assert_eq!(net.propagate(b).unwrap(), vec![c]);
        assert!(net.node(c).unwrap().is_active());
    }

    #[test]
    fn repeated_propagation_recomputes() {
        let mut net = ConceptNetwork::new();
        let a = net.add_concept("a", vec![1.0, 0.0], &config(2)).unwrap();
        let b = net.add_concept("b", vec![0.0, 1.0], &config(2).threshold(0.9)).unwrap();
        net.connect_default(a, b).unwrap();

        net.activate(a, &[1.0, 0.0]).unwrap();
        assert!(net.propagate(a).unwrap().is_empty());

        // Learning shifts a's state toward b, so the same edge now fires.
        net.update_state(a, &[0.0, 1.0], 1.0).unwrap();
        assert_eq!(net.propagate(a).unwrap(), vec![b]);
    }

    #[test]
    fn mixed_dimensions_fail_on_propagate() {
        let mut net = ConceptNetwork::new();
        let a = net.add_concept("a", vec![1.0, 0.0], &config(2)).unwrap();
        let b = net.add_concept("b", vec![1.0, 0.0, 0.0], &config(3)).unwrap();
        net.connect_default(a, b).unwrap();

        net.activate(a, &[1.0, 0.0]).unwrap();
        let err = net.propagate(a).unwrap_err();
        assert!(matches!(err, NoesisError::DimensionMismatch { expected: 3, got: 2 }));
        assert_eq!(net.node(b).unwrap().activation_level(), 0.0);
    }

    #[test]
    fn traversal_follows_first_insertion_order() {
        let mut net = ConceptNetwork::new();
        let hub = net.add_concept("hub", vec![1.0], &config(1)).unwrap();
        let x = net.add_concept("x", vec![1.0], &config(1)).unwrap();
        let y = net.add_concept("y", vec![1.0], &config(1)).unwrap();
        let z = net.add_concept("z", vec![1.0], &config(1)).unwrap();
        net.connect_default(hub, y).unwrap();
        net.connect_default(hub, x).unwrap();
        net.connect_default(hub, z).unwrap();
        net.connect(hub, y, 0.5).unwrap();

        net.activate(hub, &[2.0]).unwrap();
        assert_eq!(net.propagate(hub).unwrap(), vec![y, x, z]);
    }

    #[test]
    fn active_nodes_and_snapshot() {
        let mut net = ConceptNetwork::new();
        let a = net.add_concept("a", vec![1.0, 0.0], &config(2)).unwrap();
        let b = net.add_concept("b", vec![0.0, 1.0], &config(2).threshold(0.9)).unwrap();
        net.connect(a, b, 0.25).unwrap();
        net.activate(a, &[1.0, 0.0]).unwrap();
        net.activate(b, &[1.0, 0.0]).unwrap();

        assert_eq!(net.active_nodes(), vec![a]);

        let snap = net.snapshot();
        assert_eq!(snap.active(), vec!["a"]);
        let a_snap = snap.node("a").unwrap();
        assert_eq!(a_snap.connections, vec![("b".to_string(), 0.25)]);
        assert_eq!(snap.node("b").unwrap().activation_threshold, 0.9);
    }

    #[test]
    fn snapshot_json_names_fields() {
        let mut net = ConceptNetwork::new();
        net.add_concept("a", vec![1.0], &config(1)).unwrap();
        let json = net.snapshot().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nodes"][0]["identifier"], "a");
        assert_eq!(value["nodes"][0]["is_active"], false);
    }
}
