//! # jounce-telemetry
//!
//! Event bus for simulation telemetry. The driver emits structured
//! per-tick events (timing, energy, degenerate springs, resets) which
//! pluggable sinks consume: an in-memory recorder, `tracing`, or a
//! JSON-lines writer.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, JsonLinesSink, TracingSink, VecSink};
