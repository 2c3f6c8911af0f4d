//! NodeRotations domain for per-device rotation state.
//!
//! Holds the device-id → rotation-angle map the canvas uses to orient device
//! symbols, and persists it whole under one storage key. Replacement is
//! last-write-wins; there is no merging or partial update.

use crate::dataflow::{Actor, Relay, relay};
use crate::platform::KeyValueStore;
use futures::{StreamExt, select};
use futures_signals::signal::Signal;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Storage key for the persisted rotation map (a JSON object of
/// device id → angle).
pub const NODE_ROTATIONS_KEY: &str = "node-rotations";

/// Rotation map domain: reactive state plus write-through persistence.
///
/// # Events
///
/// - [`rotations_replaced_relay`](Self::rotations_replaced_relay) - the
///   editor replaced the whole map (e.g. after rotating a device); the new
///   map is stored and written back to storage in the same processor step.
/// - [`NodeRotations::load`] - pull the persisted map back into memory, if
///   one exists.
#[derive(Clone)]
pub struct NodeRotations {
    rotations: Actor<BTreeMap<String, f64>>,
    storage: Arc<dyn KeyValueStore>,

    /// Editor replaced the rotation map.
    pub rotations_replaced_relay: Relay<BTreeMap<String, f64>>,

    // Internal: a well-formed persisted map was read back by load().
    storage_loaded_relay: Relay<BTreeMap<String, f64>>,
}

impl NodeRotations {
    /// Create the domain on top of a storage backend.
    ///
    /// Must be called from within a tokio runtime. The persisted map is not
    /// read here; call [`NodeRotations::load`] when the editor wants it.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let (rotations_replaced_relay, mut replaced_stream) = relay();
        let (storage_loaded_relay, mut loaded_stream) = relay();

        let store = Arc::clone(&storage);
        let rotations = Actor::new(BTreeMap::new(), async move |state| {
            loop {
                select! {
                    map = replaced_stream.next() => match map {
                        Some(map) => {
                            persist(store.as_ref(), &map);
                            state.set(map);
                        }
                        None => break,
                    },
                    map = loaded_stream.next() => match map {
                        Some(map) => state.set(map),
                        None => break,
                    },
                }
            }
        });

        Self {
            rotations,
            storage,
            rotations_replaced_relay,
            storage_loaded_relay,
        }
    }

    /// Read the persisted map from storage into memory.
    ///
    /// An absent key, an unreadable backend, or malformed JSON all leave the
    /// in-memory map untouched; nothing is surfaced to the caller beyond a
    /// debug log.
    pub fn load(&self) {
        let raw = match self.storage.get_item(NODE_ROTATIONS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(err) => {
                tracing::debug!(%err, "rotation map unreadable; keeping in-memory state");
                return;
            }
        };

        match serde_json::from_str::<BTreeMap<String, f64>>(&raw) {
            Ok(map) => self.storage_loaded_relay.send(map),
            Err(err) => {
                tracing::debug!(%err, "persisted rotation map is malformed; ignoring it");
            }
        }
    }

    /// Get a reactive signal for the rotation map.
    pub fn rotations_signal(&self) -> impl Signal<Item = BTreeMap<String, f64>> + use<> {
        self.rotations.signal()
    }

    /// Get a reactive signal for one device's rotation.
    pub fn rotation_signal(&self, device_id: &str) -> impl Signal<Item = Option<f64>> + use<> {
        let device_id = device_id.to_string();
        self.rotations
            .signal_ref(move |map| map.get(&device_id).copied())
    }

    /// Get the current map directly (for event handlers and tests).
    pub fn get_cloned(&self) -> BTreeMap<String, f64> {
        self.rotations.get_cloned()
    }
}

/// Write the map back to storage; failures are absorbed and logged, the
/// in-memory state stays authoritative either way.
fn persist(store: &dyn KeyValueStore, map: &BTreeMap<String, f64>) {
    let json = match serde_json::to_string(map) {
        Ok(json) => json,
        Err(err) => {
            tracing::warn!(%err, "rotation map not serializable; skipping persistence");
            return;
        }
    };
    if let Err(err) = store.set_item(NODE_ROTATIONS_KEY, &json) {
        tracing::warn!(%err, "rotation map not persisted");
    }
}
