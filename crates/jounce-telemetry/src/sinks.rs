//! Pluggable event sinks.

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::events::SimulationEvent;

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called once when the run ends. Flush buffers here.
    fn finalize(&mut self) {}

    fn name(&self) -> &str;
}

/// Records events in memory.
///
/// Clones share one buffer, so a test can keep a handle after boxing the
/// sink into a bus.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<SimulationEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self.events.lock() {
            Ok(events) => events.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Forwards events to `tracing` at a fixed level.
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(tracing::Level::INFO)
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        let name = event.name();
        let tick = event.tick;
        let payload = &event.kind;
        if self.level == tracing::Level::ERROR {
            tracing::error!(tick, event = name, ?payload, "simulation_event");
        } else if self.level == tracing::Level::WARN {
            tracing::warn!(tick, event = name, ?payload, "simulation_event");
        } else if self.level == tracing::Level::INFO {
            tracing::info!(tick, event = name, ?payload, "simulation_event");
        } else if self.level == tracing::Level::DEBUG {
            tracing::debug!(tick, event = name, ?payload, "simulation_event");
        } else {
            tracing::trace!(tick, event = name, ?payload, "simulation_event");
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

/// Writes one JSON object per event per line.
///
/// Write errors are logged once and the sink goes quiet afterwards.
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
    failed: bool,
    written: usize,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            failed: false,
            written: 0,
        }
    }

    /// Events successfully written.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_event(&mut self, event: &SimulationEvent) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn handle(&mut self, event: &SimulationEvent) {
        if self.failed {
            return;
        }
        match self.write_event(event) {
            Ok(()) => self.written += 1,
            Err(e) => {
                tracing::warn!(error = %e, "event log write failed, disabling sink");
                self.failed = true;
            }
        }
    }

    fn finalize(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!(error = %e, "event log flush failed");
        }
    }

    fn name(&self) -> &str {
        "json_lines_sink"
    }
}
