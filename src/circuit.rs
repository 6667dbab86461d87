use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::components::{Component, ComponentKind};
use crate::error::CircuitError;

/// One end of a wire: a component id plus a pin index on that component.
///
/// Deliberately a weak reference. The component may be deleted out from
/// under the wire; lookups then degrade to `false` instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinRef {
    pub comp_id: u64,
    pub pin: usize,
}

impl PinRef {
    pub fn new(comp_id: u64, pin: usize) -> Self {
        Self { comp_id, pin }
    }
}

/// A directed edge from an output pin to an input pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wire {
    pub id: u64,
    pub from: PinRef,
    pub to: PinRef,
}

/// The aggregate owning every component and wire of one board.
///
/// The host owns the `Circuit` exclusively and hands it to the engine one
/// tick at a time; nothing here is shared or locked. Ids are handed out
/// monotonically and never reused.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    pub(crate) components: BTreeMap<u64, Component>,
    pub(crate) wires: Vec<Wire>,
    pub(crate) next_id: u64,
    pub(crate) next_wire_id: u64,
}

impl Circuit {
    pub fn new() -> Self {
        Self {
            components: BTreeMap::new(),
            wires: Vec::new(),
            next_id: 1,
            next_wire_id: 1,
        }
    }

    /// Places a new component and returns its id.
    pub fn create(&mut self, kind: ComponentKind) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.components.insert(id, Component::new(id, kind));
        log::debug!("created component {id} ({})", kind.tag());
        id
    }

    /// Places a component from an external type tag, as sent by the UI.
    /// `interval` applies to timers only and defaults to 1000 ms.
    pub fn create_from_tag(&mut self, tag: &str, interval: Option<u64>) -> Result<u64, CircuitError> {
        let kind = match (ComponentKind::from_tag(tag)?, interval) {
            (ComponentKind::Timer(_), Some(iv)) => ComponentKind::timer(iv),
            (kind, _) => kind,
        };
        Ok(self.create(kind))
    }

    pub fn get(&self, id: u64) -> Option<&Component> {
        self.components.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Component> {
        self.components.get_mut(&id)
    }

    /// Removes a component along with every wire touching it.
    pub fn remove(&mut self, id: u64) {
        self.components.remove(&id);
        self.wires
            .retain(|w| w.from.comp_id != id && w.to.comp_id != id);
    }

    /// Components in id order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// Connects an output pin to an input pin, evicting whatever wire
    /// currently feeds that input. Pin indices are not range-checked
    /// against the endpoint components; a wire to a pin outside the
    /// declared arity is inert during evaluation, not an error.
    pub fn connect(&mut self, from: PinRef, to: PinRef) -> u64 {
        self.disconnect_input(to.comp_id, to.pin);
        let id = self.next_wire_id;
        self.next_wire_id += 1;
        self.wires.push(Wire { id, from, to });
        log::debug!(
            "wire {id}: {}.{} -> {}.{}",
            from.comp_id,
            from.pin,
            to.comp_id,
            to.pin
        );
        id
    }

    /// Removes the wire feeding the given input pin, if any.
    pub fn disconnect_input(&mut self, comp_id: u64, pin: usize) {
        self.wires
            .retain(|w| !(w.to.comp_id == comp_id && w.to.pin == pin));
    }

    /// All wires driven by the given output pin (fan-out may be arbitrary).
    pub fn wires_from(&self, comp_id: u64, pin: usize) -> impl Iterator<Item = &Wire> {
        self.wires
            .iter()
            .filter(move |w| w.from.comp_id == comp_id && w.from.pin == pin)
    }

    /// The wire feeding the given input pin. At most one exists, by the
    /// eviction rule in [`Circuit::connect`].
    pub fn wire_into(&self, comp_id: u64, pin: usize) -> Option<&Wire> {
        self.wires
            .iter()
            .find(|w| w.to.comp_id == comp_id && w.to.pin == pin)
    }

    /// The seeded traffic-light demo board: a timer driving NOT and AND
    /// gates into two labeled lamps.
    pub fn traffic_demo() -> Self {
        let mut circuit = Self::new();
        let timer = circuit.create(ComponentKind::timer(1000));
        let not = circuit.create(ComponentKind::Not);
        let and = circuit.create(ComponentKind::And);
        let green = circuit.create(ComponentKind::Lamp);
        let red = circuit.create(ComponentKind::Lamp);
        if let Some(c) = circuit.get_mut(green) {
            c.label = "NS_GREEN".to_owned();
        }
        if let Some(c) = circuit.get_mut(red) {
            c.label = "NS_RED".to_owned();
        }
        circuit.connect(PinRef::new(timer, 0), PinRef::new(not, 0));
        circuit.connect(PinRef::new(not, 0), PinRef::new(and, 0));
        circuit.connect(PinRef::new(timer, 0), PinRef::new(and, 1));
        circuit.connect(PinRef::new(and, 0), PinRef::new(green, 0));
        circuit.connect(PinRef::new(not, 0), PinRef::new(red, 0));
        circuit
    }
}

impl Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "comps={} wires={}",
            self.component_count(),
            self.wire_count()
        )
    }
}
