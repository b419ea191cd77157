//! Event bus: channel-backed dispatch to pluggable sinks.
//!
//! Producers call [`EventBus::emit`] (or a [`EventBus::sender`] clone from
//! another thread). Events queue in an `mpsc` channel until
//! [`EventBus::flush`] hands them to every sink in registration order.

use std::sync::mpsc;

use crate::events::SimulationEvent;
use crate::sinks::EventSink;

pub struct EventBus {
    sender: mpsc::Sender<SimulationEvent>,
    receiver: mpsc::Receiver<SimulationEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    /// Disabled bus drops events at `emit`.
    enabled: bool,
}

impl EventBus {
    /// Creates a new event bus with no sinks.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
        }
    }

    /// Registers a sink to receive events.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Queues an event. No-op while disabled.
    pub fn emit(&self, event: SimulationEvent) {
        if !self.enabled {
            return;
        }
        // The receiver lives as long as the bus, so this cannot fail.
        let _ = self.sender.send(event);
    }

    /// A producer handle for other threads. Bypasses the enabled flag.
    pub fn sender(&self) -> mpsc::Sender<SimulationEvent> {
        self.sender.clone()
    }

    /// Dispatches all queued events. Returns how many were delivered.
    pub fn flush(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            delivered += 1;
        }
        delivered
    }

    /// Flushes pending events and finalizes every sink.
    pub fn finish(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
