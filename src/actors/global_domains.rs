//! Global domain instances.
//!
//! One-time instantiation and process-wide access to the editor domains,
//! for apps that want a single shared circuit graph and rotation map rather
//! than threading instances through every view.

use super::{CircuitGraph, NodeRotations};
use crate::platform::KeyValueStore;
use std::sync::{Arc, OnceLock};

static CIRCUIT_GRAPH: OnceLock<CircuitGraph> = OnceLock::new();
static NODE_ROTATIONS: OnceLock<NodeRotations> = OnceLock::new();

/// Initialize the global [`CircuitGraph`]. Must be called from within a
/// tokio runtime, before any [`circuit_graph()`] access.
pub fn initialize_circuit_graph() {
    if CIRCUIT_GRAPH.set(CircuitGraph::new()).is_err() {
        tracing::warn!("CircuitGraph already initialized - ignoring duplicate initialization");
    }
}

/// Initialize the global [`NodeRotations`] over a storage backend. Must be
/// called from within a tokio runtime, before any [`node_rotations()`]
/// access.
pub fn initialize_node_rotations(storage: Arc<dyn KeyValueStore>) {
    if NODE_ROTATIONS.set(NodeRotations::new(storage)).is_err() {
        tracing::warn!("NodeRotations already initialized - ignoring duplicate initialization");
    }
}

/// Access the global [`CircuitGraph`].
///
/// Panics when [`initialize_circuit_graph`] has not run; initialization
/// order is part of app startup, not a runtime condition.
pub fn circuit_graph() -> &'static CircuitGraph {
    CIRCUIT_GRAPH
        .get()
        .expect("CircuitGraph not initialized - call initialize_circuit_graph() during startup")
}

/// Access the global [`NodeRotations`].
///
/// Panics when [`initialize_node_rotations`] has not run.
pub fn node_rotations() -> &'static NodeRotations {
    NODE_ROTATIONS
        .get()
        .expect("NodeRotations not initialized - call initialize_node_rotations() during startup")
}
