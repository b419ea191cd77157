//! Simulation event types.
//!
//! Events are plain values tagged with the tick they describe. They carry
//! only scalars so they can be serialized and shipped anywhere.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Tick number the event belongs to.
    pub tick: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A tick is about to run.
    TickBegin {
        /// Simulated time at the start of the tick (seconds).
        sim_time: f64,
    },

    /// A tick completed.
    TickEnd {
        /// Wall-clock time spent in the tick (seconds).
        wall_time: f64,
        /// Free nodes integrated.
        integrated: usize,
        /// Integrator that ran the tick.
        strategy: String,
    },

    /// Energy breakdown after the tick.
    Energy {
        kinetic: f64,
        spring: f64,
        gravitational: f64,
    },

    /// Spring terms were skipped because endpoints coincided.
    DegenerateContributions {
        count: u32,
    },

    /// A tick was requested while the simulation was paused.
    Paused,

    /// The topology was rebuilt.
    Reset {
        nodes: usize,
        edges: usize,
    },

    /// Free-form event for extensions.
    Custom {
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    pub fn new(tick: u64, kind: EventKind) -> Self {
        Self { tick, kind }
    }

    /// Short name of the payload variant, used as a log field.
    pub fn name(&self) -> &'static str {
        match self.kind {
            EventKind::TickBegin { .. } => "tick_begin",
            EventKind::TickEnd { .. } => "tick_end",
            EventKind::Energy { .. } => "energy",
            EventKind::DegenerateContributions { .. } => "degenerate_contributions",
            EventKind::Paused => "paused",
            EventKind::Reset { .. } => "reset",
            EventKind::Custom { .. } => "custom",
        }
    }
}
