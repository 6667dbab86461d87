use crate::circuit::Circuit;
use crate::components::ComponentKind;

/// The six named signals of the traffic-light display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrafficLights {
    pub ns_red: bool,
    pub ns_yellow: bool,
    pub ns_green: bool,
    pub ew_red: bool,
    pub ew_yellow: bool,
    pub ew_green: bool,
}

/// Projects stabilized lamp state onto the traffic-light display.
///
/// A lamp binds to a signal when its label contains, case-insensitively,
/// both a direction token ("ns" or "ew") and a color token ("red",
/// "yellow" or "green"); the signal then takes the lamp's input value.
/// Lamps with unrecognized labels contribute nothing. When several lamps
/// match the same signal, the one with the highest id wins. Read-only:
/// the circuit is never mutated.
pub fn project_traffic_lights(circuit: &Circuit) -> TrafficLights {
    let mut lights = TrafficLights::default();
    for c in circuit.components() {
        if !matches!(c.kind(), ComponentKind::Lamp) {
            continue;
        }
        let label = c.label.to_lowercase();
        let lit = c.inputs().first().copied().unwrap_or(false);
        if label.contains("ns") {
            if label.contains("red") {
                lights.ns_red = lit;
            }
            if label.contains("yellow") {
                lights.ns_yellow = lit;
            }
            if label.contains("green") {
                lights.ns_green = lit;
            }
        }
        if label.contains("ew") {
            if label.contains("red") {
                lights.ew_red = lit;
            }
            if label.contains("yellow") {
                lights.ew_yellow = lit;
            }
            if label.contains("green") {
                lights.ew_green = lit;
            }
        }
    }
    lights
}
