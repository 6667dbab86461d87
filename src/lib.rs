//! Evaluation engine for an interactive logic-circuit playground.
//!
//! Hosts place fixed-arity components (AND, OR, NOT, TIMER, LAMP) on a
//! board, wire output pins to input pins, and drive the board with a
//! periodic tick: timers advance first, then a bounded fixed-point pass
//! recomputes every pin value, then registered consumers read the
//! stabilized state. Rendering, input handling and storage live in the
//! host; this crate only owns the graph and its evaluation.
//!
//! ```
//! use breadboard::{project_traffic_lights, Circuit, Simulation};
//!
//! let mut sim = Simulation::new(Circuit::traffic_demo());
//! sim.tick();
//! let lights = project_traffic_lights(&sim.circuit);
//! assert!(lights.ns_red);
//! ```

pub mod circuit;
pub mod components;
pub mod error;
pub mod io;
pub mod sim;
pub mod traffic;

pub use circuit::{Circuit, PinRef, Wire};
pub use components::{Component, ComponentKind, TimerState, DEFAULT_TIMER_INTERVAL};
pub use error::CircuitError;
pub use sim::{evaluate_all, get_output_value, timer_tick, Simulation, DEFAULT_TICK_MS};
pub use traffic::{project_traffic_lights, TrafficLights};
