//! Circuit graph data model.
//!
//! Serde types matching the digitaljs JSON representation
//! (<https://github.com/tilk/digitaljs>): a circuit is a map of devices, a
//! list of connectors, and a map of named subcircuits.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node in the circuit graph.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// digitaljs cell type, e.g. `"$and"` or `"$button"`.
    pub celltype: String,
    /// Display label shown on the canvas.
    pub label: String,
    /// Bus width; omitted from JSON for single-bit devices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits: Option<u32>,
}

/// One anchor endpoint: a device id plus the port name on that device.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LinkData {
    pub id: String,
    pub port: String,
}

/// A resolved directed edge between two anchors.
///
/// Connectors only ever enter a store whole; an unmatched half lives in a
/// [`crate::pairing::PairingSlot`] until its counterpart arrives.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    pub from: LinkData,
    pub to: LinkData,
}

/// Which half of a connection event a piece carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    From,
    To,
}

/// One half of a connection event emitted by the canvas.
///
/// The canvas reports the two ends of a new (or removed) wire as separate
/// events; pairing merges a `From` and a `To` into a [`Connector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectorPiece {
    From(LinkData),
    To(LinkData),
}

impl ConnectorPiece {
    pub fn kind(&self) -> PieceKind {
        match self {
            ConnectorPiece::From(_) => PieceKind::From,
            ConnectorPiece::To(_) => PieceKind::To,
        }
    }

    /// The anchor endpoint, regardless of which half this is.
    pub fn link(&self) -> &LinkData {
        match self {
            ConnectorPiece::From(link) | ConnectorPiece::To(link) => link,
        }
    }

    pub fn into_link(self) -> LinkData {
        match self {
            ConnectorPiece::From(link) | ConnectorPiece::To(link) => link,
        }
    }
}

/// A nested circuit definition referenced by composite devices.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Subcircuit {
    pub devices: BTreeMap<String, Device>,
    pub connectors: Vec<Connector>,
}

/// The whole circuit graph: device manifest, connection manifest, and
/// subcircuit definitions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Circuit {
    pub devices: BTreeMap<String, Device>,
    pub connectors: Vec<Connector>,
    pub subcircuits: BTreeMap<String, Subcircuit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(id: &str, port: &str) -> LinkData {
        LinkData {
            id: id.to_string(),
            port: port.to_string(),
        }
    }

    #[test]
    fn test_device_bits_omitted_when_absent() {
        let device = Device {
            celltype: "$button".to_string(),
            label: "btn0".to_string(),
            bits: None,
        };
        let json = serde_json::to_string(&device).unwrap();
        assert!(!json.contains("bits"));

        let wide = Device {
            celltype: "$bus".to_string(),
            label: "bus0".to_string(),
            bits: Some(8),
        };
        let json = serde_json::to_string(&wide).unwrap();
        assert!(json.contains("\"bits\":8"));
    }

    #[test]
    fn test_circuit_json_shape() {
        let mut circuit = Circuit::default();
        circuit.devices.insert(
            "dev0".to_string(),
            Device {
                celltype: "$and".to_string(),
                label: "and0".to_string(),
                bits: None,
            },
        );
        circuit.connectors.push(Connector {
            from: link("dev0", "out"),
            to: link("dev1", "in1"),
        });

        let json = serde_json::to_value(&circuit).unwrap();
        assert_eq!(json["devices"]["dev0"]["celltype"], "$and");
        assert_eq!(json["connectors"][0]["from"]["port"], "out");
        assert_eq!(json["subcircuits"], serde_json::json!({}));

        let back: Circuit = serde_json::from_value(json).unwrap();
        assert_eq!(back, circuit);
    }

    #[test]
    fn test_piece_kind_and_link() {
        let piece = ConnectorPiece::From(link("dev0", "out"));
        assert_eq!(piece.kind(), PieceKind::From);
        assert_eq!(piece.link().id, "dev0");
        assert_eq!(piece.into_link().port, "out");
    }
}
