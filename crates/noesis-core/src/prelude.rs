//! Noesis Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use noesis_core::prelude::*;
//! ```

pub use crate::config::NodeConfig;
pub use crate::network::ConceptNetwork;
pub use crate::node::ConceptNode;
pub use crate::types::{
    Connection, Edge, NetworkSnapshot, NodeId, NodeSnapshot, DEFAULT_CONNECTION_WEIGHT,
};

pub use crate::error::{NoesisError, Result};
