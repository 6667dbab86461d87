use std::collections::HashMap;

use crate::circuit::Circuit;
use crate::components::ComponentKind;

/// Default tick period a host drives the simulation with, in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 200;

/// Iteration cap for one evaluation pass. Enough to settle any acyclic
/// graph of depth 6; a combinational cycle that still oscillates at the
/// cap is frozen as-is and its round-6 snapshot becomes the tick's answer.
const MAX_ROUNDS: usize = 6;

/// Recomputes every output and input pin value until the graph stabilizes
/// or the round cap is hit.
///
/// Pin values are level-triggered: this is a pure function of the wire
/// topology, the component kinds and the timers' toggle states, recomputed
/// from scratch on every call. Timers are the only sources and keep their
/// state; all other outputs start the pass at `false`. Wires whose source
/// component is gone, or whose pin indices fall outside the endpoint's
/// declared arity, resolve to `false` instead of failing the pass.
pub fn evaluate_all(circuit: &mut Circuit) {
    let mut outs: HashMap<(u64, usize), bool> = HashMap::new();

    // Reset pass. Timer outputs are never zeroed.
    for c in circuit.components.values_mut() {
        match c.kind {
            ComponentKind::Timer(t) => {
                if let Some(out) = c.outputs.first_mut() {
                    *out = t.state;
                }
            }
            _ => c.outputs.fill(false),
        }
        for (pin, &v) in c.outputs.iter().enumerate() {
            outs.insert((c.id, pin), v);
        }
    }
    propagate(circuit, &outs);

    for round in 1..=MAX_ROUNDS {
        let mut changed = false;
        for c in circuit.components.values_mut() {
            if let Some(v) = c.kind.eval(&c.inputs) {
                if let Some(out) = c.outputs.first_mut() {
                    if *out != v {
                        *out = v;
                        changed = true;
                    }
                }
            }
        }
        for c in circuit.components.values() {
            for (pin, &v) in c.outputs.iter().enumerate() {
                outs.insert((c.id, pin), v);
            }
        }
        propagate(circuit, &outs);
        if !changed {
            log::trace!("evaluation stable after {round} round(s)");
            return;
        }
    }
    log::trace!("evaluation hit the {MAX_ROUNDS}-round cap, keeping snapshot");
}

/// Rewrites every input pin from its driving wire's source output, taking
/// `false` for undriven pins and dangling sources.
fn propagate(circuit: &mut Circuit, outs: &HashMap<(u64, usize), bool>) {
    let Circuit {
        components, wires, ..
    } = circuit;
    for c in components.values_mut() {
        for pin in 0..c.inputs.len() {
            let wire = wires
                .iter()
                .find(|w| w.to.comp_id == c.id && w.to.pin == pin);
            c.inputs[pin] = wire
                .map(|w| outs.get(&(w.from.comp_id, w.from.pin)).copied().unwrap_or(false))
                .unwrap_or(false);
        }
    }
}

/// Advances every timer by one tick period, flipping its toggle state when
/// the configured interval elapses. The timer's output pin always reflects
/// the current state afterwards, flip or no flip.
///
/// Runs strictly before [`evaluate_all`] within a tick; the evaluator
/// treats timer outputs as fixed source values.
pub fn timer_tick(circuit: &mut Circuit, tick_ms: u64) {
    for c in circuit.components.values_mut() {
        if let ComponentKind::Timer(t) = &mut c.kind {
            t.elapsed += tick_ms;
            if t.elapsed >= t.interval {
                t.elapsed = 0;
                t.state = !t.state;
                log::trace!("timer {} flipped to {}", c.id, t.state);
            }
            let state = t.state;
            if let Some(out) = c.outputs.first_mut() {
                *out = state;
            }
        }
    }
}

/// Current value of an output pin, `false` for unknown components or pins.
pub fn get_output_value(circuit: &Circuit, comp_id: u64, pin: usize) -> bool {
    circuit
        .get(comp_id)
        .and_then(|c| c.outputs().get(pin))
        .copied()
        .unwrap_or(false)
}

/// Per-tick driver owning the circuit and the registered consumers.
///
/// One tick runs, in order: timer advance, fixed-point evaluation, then
/// every consumer over the stabilized state. The host must not mutate the
/// circuit while a tick is in flight; between ticks it may rewire freely.
pub struct Simulation {
    pub circuit: Circuit,
    tick_ms: u64,
    consumers: Vec<Box<dyn FnMut(&Circuit)>>,
}

impl Simulation {
    pub fn new(circuit: Circuit) -> Self {
        Self::with_tick_period(circuit, DEFAULT_TICK_MS)
    }

    pub fn with_tick_period(circuit: Circuit, tick_ms: u64) -> Self {
        Self {
            circuit,
            tick_ms,
            consumers: Vec::new(),
        }
    }

    pub fn tick_period(&self) -> u64 {
        self.tick_ms
    }

    /// Registers a read-only consumer invoked once per tick after
    /// evaluation, e.g. the traffic-light projection or a renderer.
    pub fn add_consumer<F>(&mut self, consumer: F)
    where
        F: FnMut(&Circuit) + 'static,
    {
        self.consumers.push(Box::new(consumer));
    }

    pub fn tick(&mut self) {
        timer_tick(&mut self.circuit, self.tick_ms);
        evaluate_all(&mut self.circuit);
        for consumer in &mut self.consumers {
            consumer(&self.circuit);
        }
    }
}
