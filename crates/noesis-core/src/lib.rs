//! # Noesis Core
//!
//! Concept nodes that activate on similar input and pass a weighted copy
//! of their state to their neighbors.
//!
//! - **Activation**: cosine similarity between a node's state and an input,
//!   rescaled to [0, 1] and compared against the node's threshold
//! - **Propagation**: an active node sends `state * activation * weight`
//!   along each outgoing edge, exactly one hop per call
//! - **Learning**: `update_state` moves the state toward a normalized input
//!   and renormalizes it
//!
//! Nodes live in a [`ConceptNetwork`](network::ConceptNetwork) arena and
//! refer to each other by [`NodeId`](types::NodeId) handle.
//!
//! ## Quick Start
//!
//! ```rust
//! use noesis_core::prelude::*;
//!
//! # fn main() -> noesis_core::error::Result<()> {
//! let config = NodeConfig::with_dimension(4);
//! let mut net = ConceptNetwork::new();
//! let cat = net.add_concept("cat", vec![0.8, 0.6, 0.0, 0.0], &config)?;
//!
//! let level = net.activate(cat, &[0.8, 0.6, 0.0, 0.0])?;
//! assert!((level - 1.0).abs() < 1e-9);
//! assert!(net.node(cat).unwrap().is_active());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod network;
pub mod node;
pub mod prelude;
pub mod types;
pub mod vector;
