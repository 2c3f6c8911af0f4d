//! CircuitGraph domain for the editor's circuit state.
//!
//! Devices and subcircuits live in reactive maps, connectors in a reactive
//! list. Anchor link/unlink events arrive as halves from the canvas and are
//! paired into whole connectors before they touch the stored graph, so no
//! partial connector is ever observable.

use crate::circuit::{Circuit, Connector, ConnectorPiece, Device, Subcircuit};
use crate::dataflow::{ActorMap, ActorVec, Relay, relay};
use crate::pairing::PairingSlot;
use futures::{StreamExt, select};
use futures_signals::map_ref;
use futures_signals::signal::Signal;
use futures_signals::signal_map::SignalMapExt;
use futures_signals::signal_vec::{SignalVec, SignalVecExt};
use std::collections::BTreeMap;

/// Circuit graph domain: devices, connectors, subcircuits.
///
/// # Events
///
/// - [`anchor_linked_relay`](Self::anchor_linked_relay) /
///   [`anchor_unlinked_relay`](Self::anchor_unlinked_relay) - one half of a
///   connection the canvas created or removed. Both streams feed a single
///   [`PairingSlot`] inside the connectors processor; a completed pair is
///   appended to (or removed from) the connector list by whichever stream
///   delivered the completing half. Because the slot is shared, link and
///   unlink halves from two simultaneous gestures can cross-pair - the
///   canvas delivers the two halves of one gesture back to back, and nothing
///   in the event data would let us tell interleavings apart.
/// - [`device_added_relay`](Self::device_added_relay) /
///   [`device_removed_relay`](Self::device_removed_relay) - device manifest
///   edits; removal also prunes connectors referencing the device.
/// - [`subcircuit_registered_relay`](Self::subcircuit_registered_relay) -
///   a nested circuit definition became available.
#[derive(Clone, Debug)]
pub struct CircuitGraph {
    devices: ActorMap<String, Device>,
    connectors: ActorVec<Connector>,
    subcircuits: ActorMap<String, Subcircuit>,

    /// Canvas reported one half of a new connection.
    pub anchor_linked_relay: Relay<ConnectorPiece>,
    /// Canvas reported one half of a removed connection.
    pub anchor_unlinked_relay: Relay<ConnectorPiece>,
    /// User placed a device (id, device); an existing id is replaced.
    pub device_added_relay: Relay<(String, Device)>,
    /// User deleted a device by id.
    pub device_removed_relay: Relay<String>,
    /// A subcircuit definition was registered under a name.
    pub subcircuit_registered_relay: Relay<(String, Subcircuit)>,
}

impl CircuitGraph {
    /// Create an empty circuit graph domain.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new() -> Self {
        let (anchor_linked_relay, mut linked_stream) = relay::<ConnectorPiece>();
        let (anchor_unlinked_relay, mut unlinked_stream) = relay::<ConnectorPiece>();
        let (device_added_relay, mut device_added_stream) = relay::<(String, Device)>();
        let (device_removed_relay, mut device_removed_stream) = relay::<String>();
        let (subcircuit_registered_relay, mut subcircuit_stream) =
            relay::<(String, Subcircuit)>();

        // Bridge: the devices processor owns removal and forwards the id so
        // the connectors processor can drop edges touching the device.
        let (device_pruned_relay, mut pruned_stream) = relay::<String>();

        let devices = ActorMap::new(BTreeMap::new(), async move |map| {
            loop {
                select! {
                    entry = device_added_stream.next() => match entry {
                        Some((id, device)) => {
                            map.lock_mut().insert_cloned(id, device);
                        }
                        None => break,
                    },
                    id = device_removed_stream.next() => match id {
                        Some(id) => {
                            if map.lock_mut().remove(&id).is_none() {
                                tracing::debug!(%id, "remove for unknown device ignored");
                                continue;
                            }
                            device_pruned_relay.send(id);
                        }
                        None => break,
                    },
                }
            }
        });

        let connectors = ActorVec::new(Vec::new(), async move |connectors| {
            // One slot for both streams: an unlink half can complete a link
            // half and vice versa. See the struct docs for why.
            let mut pairing = PairingSlot::new();
            loop {
                select! {
                    piece = linked_stream.next() => match piece {
                        Some(piece) => {
                            if let Some(connector) = pairing.accept(piece) {
                                connectors.push_cloned(connector);
                            }
                        }
                        None => break,
                    },
                    piece = unlinked_stream.next() => match piece {
                        Some(piece) => {
                            if let Some(connector) = pairing.accept(piece) {
                                let index = connectors
                                    .lock_ref()
                                    .iter()
                                    .position(|existing| *existing == connector);
                                match index {
                                    Some(index) => {
                                        connectors.remove(index);
                                    }
                                    // Unlinking a connector we never stored
                                    // is a no-op.
                                    None => {
                                        tracing::debug!(?connector, "unlink for unknown connector ignored");
                                    }
                                }
                            }
                        }
                        None => break,
                    },
                    device_id = pruned_stream.next() => match device_id {
                        Some(device_id) => {
                            connectors.retain(|connector| {
                                connector.from.id != device_id && connector.to.id != device_id
                            });
                        }
                        None => break,
                    },
                }
            }
        });

        let subcircuits = ActorMap::new(BTreeMap::new(), async move |map| {
            while let Some((name, subcircuit)) = subcircuit_stream.next().await {
                map.lock_mut().insert_cloned(name, subcircuit);
            }
        });

        Self {
            devices,
            connectors,
            subcircuits,
            anchor_linked_relay,
            anchor_unlinked_relay,
            device_added_relay,
            device_removed_relay,
            subcircuit_registered_relay,
        }
    }

    /// Get a signal emitting a whole [`Circuit`] snapshot on every change.
    ///
    /// This is the view serialization and the canvas consume; for fine-
    /// grained UI bindings prefer the per-collection signals below.
    pub fn circuit_signal(&self) -> impl Signal<Item = Circuit> + use<> {
        map_ref! {
            let devices = self.devices.entries_signal_vec().to_signal_cloned(),
            let connectors = self.connectors.signal(),
            let subcircuits = self.subcircuits.entries_signal_vec().to_signal_cloned() =>
            Circuit {
                devices: devices.iter().cloned().collect(),
                connectors: connectors.clone(),
                subcircuits: subcircuits.iter().cloned().collect(),
            }
        }
    }

    /// Get an efficient VecDiff signal for the connector list.
    pub fn connectors_signal_vec(&self) -> impl SignalVec<Item = Connector> + use<> {
        self.connectors.signal_vec()
    }

    /// Get a signal emitting the whole connector list on every change.
    pub fn connectors_signal(&self) -> impl Signal<Item = Vec<Connector>> + use<> {
        self.connectors.signal()
    }

    /// Get an efficient MapDiff signal for the device manifest.
    pub fn devices_signal_map(&self) -> impl SignalMapExt<Key = String, Value = Device> + use<> {
        self.devices.signal_map()
    }

    /// Get a signal for one device by id.
    pub fn device_signal(&self, id: &str) -> impl Signal<Item = Option<Device>> + use<> {
        self.devices.value_signal(id.to_string())
    }

    /// Get a whole-circuit snapshot directly (for event handlers and tests).
    pub fn circuit_snapshot(&self) -> Circuit {
        Circuit {
            devices: self.devices.get_cloned(),
            connectors: self.connectors.get_cloned(),
            subcircuits: self.subcircuits.get_cloned(),
        }
    }
}

impl Default for CircuitGraph {
    fn default() -> Self {
        Self::new()
    }
}
