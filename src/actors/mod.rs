//! Editor domains built on the dataflow primitives.
//!
//! Domain structs model what the editor state *is* - the circuit graph, the
//! rotation map - and own all mutation of it. UI code sends events through
//! the domains' public relays and binds to their signals.
//!
//! - **[`CircuitGraph`]** - devices, connectors, subcircuits; pairs anchor
//!   link/unlink halves into whole connectors
//! - **[`NodeRotations`]** - per-device rotation angles with write-through
//!   persistence

pub mod circuit_graph;
pub mod global_domains;
pub mod node_rotations;

pub use circuit_graph::CircuitGraph;
pub use global_domains::{
    circuit_graph, initialize_circuit_graph, initialize_node_rotations, node_rotations,
};
pub use node_rotations::{NODE_ROTATIONS_KEY, NodeRotations};
