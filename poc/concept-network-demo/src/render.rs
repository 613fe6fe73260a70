//! Text rendering of a concept network.

use colored::Colorize;
use noesis_core::prelude::*;

use crate::network::RoundReport;

fn identifiers(net: &ConceptNetwork, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .filter_map(|&id| net.node(id))
        .map(|n| n.identifier().to_string())
        .collect()
}

pub fn print_round(net: &ConceptNetwork, report: &RoundReport) {
    for (identifier, level) in &report.direct_levels {
        println!("Node '{}' activation: {:.4}", identifier, level);
    }
    println!(
        "Active nodes: {:?}",
        identifiers(net, &report.initially_active)
    );
    println!();
    println!("{}", "Propagating activation from active nodes...".blue());
    println!(
        "Additionally activated nodes after propagation: {:?}",
        identifiers(net, &report.propagated)
    );
}

pub fn print_network_state(net: &ConceptNetwork, active: &[NodeId]) {
    println!();
    println!("{}", "Network State".white().bold());
    println!("{}", "═".repeat(40).dimmed());

    for (id, node) in net.nodes() {
        let status = if active.contains(&id) {
            "ACTIVE".green().bold()
        } else {
            "inactive".dimmed()
        };
        let connections: Vec<&str> = net
            .connections(id)
            .map(|conns| conns.iter().map(|c| c.identifier).collect())
            .unwrap_or_default();

        println!("Node: {} [{}]", node.identifier().to_uppercase().cyan(), status);
        println!("  - Activation:  {:.4}", node.activation_level());
        println!("  - Connections: {}", connections.join(", "));
    }

    println!();
    println!("{}", "Active Path".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    let path = identifiers(net, active);
    if path.is_empty() {
        println!("No nodes activated");
    } else {
        println!("{}", path.join(" -> "));
    }
}
