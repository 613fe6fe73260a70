//! The fixed cat / pet / dog / animal network and one activation round.

use noesis_core::prelude::*;
use noesis_core::vector::l2_normalized;

pub const CONCEPT_DIMENSION: usize = 4;

/// Raw concept states, normalized when the network is built.
const CONCEPTS: [(&str, [f64; CONCEPT_DIMENSION]); 4] = [
    ("cat", [0.8, 0.6, 0.0, 0.0]),
    ("pet", [0.5, 0.8, 0.2, 0.0]),
    ("dog", [0.7, 0.5, 0.3, 0.0]),
    ("animal", [0.9, 0.2, 0.1, 0.3]),
];

const CONNECTIONS: [(&str, &str, f64); 5] = [
    ("cat", "pet", 0.8),
    ("cat", "animal", 0.9),
    ("dog", "pet", 0.8),
    ("dog", "animal", 0.9),
    ("pet", "animal", 0.7),
];

pub fn build_network(config: &NodeConfig) -> Result<ConceptNetwork> {
    let mut net = ConceptNetwork::new();
    for (identifier, state) in CONCEPTS {
        net.add_concept(identifier, l2_normalized(&state), config)?;
    }
    for (from, to, weight) in CONNECTIONS {
        let source = net.id_of(from).ok_or_else(|| NoesisError::node_not_found(from))?;
        let target = net.id_of(to).ok_or_else(|| NoesisError::node_not_found(to))?;
        net.connect(source, target, weight)?;
    }
    tracing::info!(nodes = net.len(), edges = net.edge_count(), "concept network built");
    Ok(net)
}

/// An input resembling the `cat` concept.
pub fn cat_query() -> Vec<f64> {
    l2_normalized(&[0.8, 0.6, 0.1, 0.0])
}

/// What one activation + propagation round did.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    /// Direct activation of each node against the query, in insertion order.
    pub direct_levels: Vec<(String, f64)>,
    /// Nodes active after the direct activation.
    pub initially_active: Vec<NodeId>,
    /// Nodes first activated by propagation, in discovery order.
    pub propagated: Vec<NodeId>,
}

impl RoundReport {
    /// Everything that fired this round: direct hits, then propagated ones.
    pub fn all_active(&self) -> Vec<NodeId> {
        self.initially_active
            .iter()
            .chain(self.propagated.iter())
            .copied()
            .collect()
    }
}

/// Activate every node with `query`, then propagate once from each node
/// that fired.
pub fn run_round(net: &mut ConceptNetwork, query: &[f64]) -> Result<RoundReport> {
    let ids: Vec<NodeId> = net.nodes().map(|(id, _)| id).collect();
    let mut direct_levels = Vec::with_capacity(ids.len());
    for id in ids {
        let level = net.activate(id, query)?;
        let identifier = net.node(id).map(|n| n.identifier().to_string()).unwrap_or_default();
        direct_levels.push((identifier, level));
    }

    let initially_active = net.active_nodes();
    let mut propagated = Vec::new();
    for &source in &initially_active {
        for target in net.propagate(source)? {
            if !initially_active.contains(&target) && !propagated.contains(&target) {
                propagated.push(target);
            }
        }
    }

    tracing::info!(
        active = initially_active.len(),
        propagated = propagated.len(),
        "activation round complete"
    );
    Ok(RoundReport {
        direct_levels,
        initially_active,
        propagated,
    })
}

/// Nudge every node in `ids` toward `query`.
pub fn learn(net: &mut ConceptNetwork, ids: &[NodeId], query: &[f64], rate: f64) -> Result<()> {
    for &id in ids {
        net.update_state(id, query, rate)?;
    }
    tracing::info!(nodes = ids.len(), rate, "learning applied");
    Ok(())
}
