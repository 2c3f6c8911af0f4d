//! Core dataflow primitives for reactive state management
//!
//! The foundational Actor+Relay components, independent of any circuit
//! semantics. Everything stateful in the crate is built from these.
//!
//! # Core Components
//!
//! - **[`Relay`]** - Type-safe event streaming over plain channels
//! - **[`Actor`]** - Single-value reactive state container
//! - **[`ActorVec`]** - Reactive collection container
//! - **[`ActorMap`]** - Reactive key-value map container
//! - **[`Atom`]** - Convenient wrapper for local UI state
//!
//! # Architecture Principles
//!
//! 1. **No Raw Mutables** - all state lives in an Actor variant or Atom
//! 2. **Event-Source Naming** - relays follow the `{source}_{event}_relay` pattern
//! 3. **Signal Access** - reads go through signals, mutation through relays
//! 4. **Cache Values Only in Actors** - transient working state (like a
//!    pairing slot) lives inside a processor loop, never in a global

pub mod actor;
pub mod actor_map;
pub mod actor_vec;
pub mod atom;
pub mod relay;
pub mod task;

pub use actor::Actor;
pub use actor_map::ActorMap;
pub use actor_vec::{ActorVec, ActorVecHandle};
pub use atom::Atom;
pub use relay::{Relay, RelayError, relay};
pub use task::{Task, TaskHandle};
