//! Reactive state management for a digital-circuit editor.
//!
//! wireflow holds the editor's state in observable containers built on the
//! Actor+Relay architecture: every piece of state lives in an [`Actor`],
//! [`ActorVec`] or [`ActorMap`] and is mutated exclusively by typed events
//! sent through [`Relay`]s. UI code binds to state through `futures-signals`
//! signals and never touches it directly.
//!
//! # Layers
//!
//! - [`dataflow`] - the architecture primitives (Relay, Actor, ActorVec,
//!   ActorMap, Atom), independent of any circuit semantics
//! - [`circuit`] - the digitaljs-style data model (devices, connectors,
//!   subcircuits)
//! - [`pairing`] - merging of asynchronously arriving anchor-connection
//!   halves into whole connectors
//! - [`actors`] - the editor domains: [`CircuitGraph`] and [`NodeRotations`]
//! - [`platform`] - key-value storage backends behind the [`KeyValueStore`]
//!   seam
//!
//! Actors spawn their processor loops onto the ambient tokio runtime, so all
//! domain construction must happen inside one.

pub mod actors;
pub mod circuit;
pub mod dataflow;
pub mod pairing;
pub mod platform;

pub use actors::{CircuitGraph, NodeRotations};
pub use circuit::{Circuit, Connector, ConnectorPiece, Device, LinkData, PieceKind, Subcircuit};
pub use dataflow::{Actor, ActorMap, ActorVec, Atom, Relay, RelayError, relay};
pub use pairing::{PairingSlot, PairingTimeout};
pub use platform::{FileStore, KeyValueStore, MemoryStore, StorageError};
