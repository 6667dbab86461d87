//! Import/export of circuit documents and the plain-text netlist view.
//!
//! The interchange format is a JSON document with `components` and `wires`
//! top-level fields, matching what the playground UI exports. Loading is
//! tolerant: missing collections default to empty, pin vectors are resized
//! to the declared arity, and an absent `nextId` is recomputed so freshly
//! created components keep getting unused ids.

use serde::{Deserialize, Serialize};

use crate::circuit::{Circuit, Wire};
use crate::components::{Component, ComponentKind, DEFAULT_TIMER_INTERVAL};
use crate::error::CircuitError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CircuitDoc {
    #[serde(default)]
    pub components: Vec<ComponentDoc>,
    #[serde(default)]
    pub wires: Vec<Wire>,
    /// Only honored on load; exports leave it out and loaders recompute it.
    #[serde(default, rename = "nextId", skip_serializing)]
    pub next_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDoc {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub inputs: Vec<bool>,
    #[serde(default)]
    pub outputs: Vec<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,
}

pub fn to_doc(circuit: &Circuit) -> CircuitDoc {
    CircuitDoc {
        components: circuit
            .components()
            .map(|c| ComponentDoc {
                id: c.id(),
                kind: c.kind().tag().to_owned(),
                label: c.label.clone(),
                inputs: c.inputs().to_vec(),
                outputs: c.outputs().to_vec(),
                interval: match c.kind() {
                    ComponentKind::Timer(t) => Some(t.interval),
                    _ => None,
                },
            })
            .collect(),
        wires: circuit.wires().to_vec(),
        next_id: None,
    }
}

/// Rebuilds a circuit from a document.
///
/// Timer toggle state and elapsed counters are not part of the format;
/// loaded timers restart from `false`. Wires sharing a destination pin are
/// deduplicated the same way live connecting does: the later one wins.
pub fn from_doc(doc: CircuitDoc) -> Result<Circuit, CircuitError> {
    let mut circuit = Circuit::new();
    for cd in doc.components {
        let kind = match ComponentKind::from_tag(&cd.kind)? {
            ComponentKind::Timer(_) => {
                ComponentKind::timer(cd.interval.unwrap_or(DEFAULT_TIMER_INTERVAL))
            }
            kind => kind,
        };
        let mut component = Component::new(cd.id, kind);
        if !cd.label.is_empty() {
            component.label = cd.label;
        }
        let mut inputs = cd.inputs;
        inputs.resize(kind.input_count(), false);
        component.inputs = inputs;
        let mut outputs = cd.outputs;
        outputs.resize(kind.output_count(), false);
        component.outputs = outputs;
        circuit.components.insert(cd.id, component);
    }
    for wire in doc.wires {
        circuit
            .wires
            .retain(|w| !(w.to.comp_id == wire.to.comp_id && w.to.pin == wire.to.pin));
        circuit.wires.push(wire);
    }
    circuit.next_id = doc
        .next_id
        .unwrap_or_else(|| circuit.components.keys().next_back().map_or(1, |id| id + 1));
    circuit.next_wire_id = circuit
        .wires
        .iter()
        .map(|w| w.id)
        .max()
        .map_or(1, |id| id + 1);
    log::debug!("loaded circuit: {circuit}");
    Ok(circuit)
}

pub fn to_json(circuit: &Circuit) -> Result<String, CircuitError> {
    Ok(serde_json::to_string_pretty(&to_doc(circuit))?)
}

pub fn from_json(json: &str) -> Result<Circuit, CircuitError> {
    from_doc(serde_json::from_str(json)?)
}

/// The "code view": one line per driven connection, in id order. Wires
/// with a missing endpoint are left out.
pub fn netlist(circuit: &Circuit) -> String {
    let mut lines = Vec::new();
    for c in circuit.components() {
        for pin in 0..c.outputs().len() {
            for wire in circuit.wires_from(c.id(), pin) {
                if let Some(to) = circuit.get(wire.to.comp_id) {
                    lines.push(format!(
                        "{}.{pin} -> {}.in{}",
                        c.label, to.label, wire.to.pin
                    ));
                }
            }
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::PinRef;

    #[test]
    fn round_trip_preserves_graph() {
        let mut circuit = Circuit::traffic_demo();
        circuit.get_mut(1).unwrap().set_interval(1500);

        let loaded = from_json(&to_json(&circuit).unwrap()).unwrap();

        assert_eq!(loaded.component_count(), circuit.component_count());
        for (a, b) in circuit.components().zip(loaded.components()) {
            assert_eq!(a.id(), b.id());
            assert_eq!(a.kind().tag(), b.kind().tag());
            assert_eq!(a.label, b.label);
        }
        assert_eq!(loaded.wires(), circuit.wires());
        assert!(matches!(
            loaded.get(1).unwrap().kind(),
            ComponentKind::Timer(t) if t.interval == 1500
        ));
    }

    #[test]
    fn timer_toggle_state_is_not_persisted() {
        let mut circuit = Circuit::new();
        let timer = circuit.create(ComponentKind::timer(400));
        crate::sim::timer_tick(&mut circuit, 400);
        assert!(crate::sim::get_output_value(&circuit, timer, 0));

        let loaded = from_json(&to_json(&circuit).unwrap()).unwrap();
        assert!(matches!(
            loaded.get(timer).unwrap().kind(),
            ComponentKind::Timer(t) if !t.state && t.elapsed == 0 && t.interval == 400
        ));
    }

    #[test]
    fn next_id_is_recomputed_when_absent() {
        let mut loaded = from_json(
            r#"{"components": [{"id": 7, "type": "AND", "label": "A",
                "inputs": [false, false], "outputs": [false]}],
                "wires": []}"#,
        )
        .unwrap();
        assert_eq!(loaded.create(ComponentKind::Lamp), 8);
    }

    #[test]
    fn empty_document_loads_as_empty_circuit() {
        let mut loaded = from_json("{}").unwrap();
        assert_eq!(loaded.component_count(), 0);
        assert_eq!(loaded.wire_count(), 0);
        assert_eq!(loaded.create(ComponentKind::And), 1);
    }

    #[test]
    fn unknown_type_tag_is_rejected() {
        let err = from_json(r#"{"components": [{"id": 1, "type": "XNOR"}]}"#).unwrap_err();
        assert!(matches!(err, CircuitError::InvalidType(t) if t == "XNOR"));
    }

    #[test]
    fn malformed_pin_vectors_are_resized_to_arity() {
        let loaded = from_json(
            r#"{"components": [{"id": 1, "type": "AND", "inputs": [true],
                "outputs": [true, true, true]}]}"#,
        )
        .unwrap();
        let c = loaded.get(1).unwrap();
        assert_eq!(c.inputs(), &[true, false]);
        assert_eq!(c.outputs(), &[true]);
    }

    #[test]
    fn duplicate_destinations_keep_the_later_wire() {
        let loaded = from_json(
            r#"{"components": [
                    {"id": 1, "type": "TIMER"},
                    {"id": 2, "type": "TIMER"},
                    {"id": 3, "type": "LAMP"}],
                "wires": [
                    {"id": 10, "from": {"compId": 1, "pin": 0}, "to": {"compId": 3, "pin": 0}},
                    {"id": 11, "from": {"compId": 2, "pin": 0}, "to": {"compId": 3, "pin": 0}}]}"#,
        )
        .unwrap();
        assert_eq!(loaded.wire_count(), 1);
        assert_eq!(loaded.wire_into(3, 0).map(|w| w.id), Some(11));
    }

    #[test]
    fn netlist_lists_driven_connections() {
        let mut circuit = Circuit::new();
        let timer = circuit.create(ComponentKind::timer(1000));
        let not = circuit.create(ComponentKind::Not);
        let lamp = circuit.create(ComponentKind::Lamp);
        circuit.get_mut(lamp).unwrap().label = "NS_RED".to_owned();
        circuit.connect(PinRef::new(timer, 0), PinRef::new(not, 0));
        circuit.connect(PinRef::new(not, 0), PinRef::new(lamp, 0));

        assert_eq!(netlist(&circuit), "TIMER.0 -> NOT.in0\nNOT.0 -> NS_RED.in0");

        circuit.components.remove(&lamp);
        assert_eq!(netlist(&circuit), "TIMER.0 -> NOT.in0");
    }
}
