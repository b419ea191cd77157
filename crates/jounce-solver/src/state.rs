//! Simulation state: per-node position and velocity buffers.
//!
//! Positions and velocities live in plain SoA `Vec`s indexed by node id,
//! separate from the [`Graph`] (which only holds topology and rest data).
//!
//! # Double buffering
//!
//! Each tick reads exclusively from the `old_*` snapshot and writes
//! exclusively into `position` / `velocity`. Because no worker ever reads
//! the live buffers during integration, the free nodes can be split into
//! disjoint `&mut` slices without locks.

use glam::DVec3;
use jounce_frame::Graph;
use jounce_types::{JounceError, JounceResult};

/// SoA simulation state buffers.
///
/// All arrays have length `node_count`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    /// Number of nodes.
    pub node_count: usize,

    // ─── Live (written during integration) ───
    pub position: Vec<DVec3>,
    pub velocity: Vec<DVec3>,

    // ─── Snapshot (read during integration) ───
    /// Start-of-tick positions. For anchors this holds the freshly excited
    /// position, which is what neighbors must react to within the same tick.
    pub old_position: Vec<DVec3>,
    pub old_velocity: Vec<DVec3>,

    /// Accumulated position in the terrain field.
    pub travel_offset: DVec3,

    /// Ticks completed since construction or the last reset.
    pub tick: u64,
}

/// Read-only view of the snapshot buffers handed to integration workers.
#[derive(Debug, Clone, Copy)]
pub struct Frozen<'a> {
    pub position: &'a [DVec3],
    pub velocity: &'a [DVec3],
}

impl SimulationState {
    /// Initializes state from a graph: every node at its rest position, at rest.
    pub fn from_graph(graph: &Graph) -> Self {
        let position = graph.rest_positions();
        let n = position.len();
        Self {
            node_count: n,
            old_position: position.clone(),
            position,
            velocity: vec![DVec3::ZERO; n],
            old_velocity: vec![DVec3::ZERO; n],
            travel_offset: DVec3::ZERO,
            tick: 0,
        }
    }

    /// Fails when the buffers were built for a different topology.
    pub fn check_matches(&self, graph: &Graph) -> JounceResult<()> {
        if self.node_count != graph.node_count() {
            return Err(JounceError::InvalidConfig(format!(
                "state has {} nodes but graph has {}",
                self.node_count,
                graph.node_count()
            )));
        }
        Ok(())
    }

    /// Snapshot phase.
    ///
    /// Free nodes copy `position → old_position` and `velocity → old_velocity`.
    /// Anchors publish their current (already excited) position into
    /// `old_position` so that every neighbor lookup during integration reads
    /// the snapshot alone. Anchors never get an integration snapshot of their
    /// own: their excitation base is the graph's rest position.
    pub fn snapshot(&mut self, graph: &Graph) {
        for (i, node) in graph.nodes().iter().enumerate() {
            self.old_position[i] = self.position[i];
            if !node.anchored {
                self.old_velocity[i] = self.velocity[i];
            }
        }
    }

    /// Splits the state into the frozen snapshot and the live write buffers.
    pub fn split_mut(&mut self) -> (Frozen<'_>, &mut [DVec3], &mut [DVec3]) {
        (
            Frozen {
                position: &self.old_position,
                velocity: &self.old_velocity,
            },
            &mut self.position,
            &mut self.velocity,
        )
    }

    /// Axis-aligned bounds of the current positions, or `None` when empty.
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        let first = *self.position.first()?;
        Some(
            self.position
                .iter()
                .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
        )
    }

    /// True when any live position or velocity is NaN or infinite.
    pub fn has_non_finite(&self) -> bool {
        self.position
            .iter()
            .chain(self.velocity.iter())
            .any(|v| !v.is_finite())
    }
}
