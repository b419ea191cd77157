//! Integrator strategy trait: the seam between the tick pipeline and
//! the code that walks the free nodes.
//!
//! A tick always runs the same phases:
//!
//! ```text
//! 1. excite   advance travel offset, move anchors to the road height
//! 2. snapshot freeze old position/velocity
//! 3. integrate every free node from the snapshot   <- strategy
//! ```
//!
//! Phases 1 and 2 run once on the calling thread. Only phase 3 is
//! delegated, so every strategy observes the same snapshot.

use std::time::Instant;

use jounce_frame::Graph;
use jounce_terrain::TerrainSampler;
use jounce_types::JounceResult;

use crate::config::SimParams;
use crate::excitation;
use crate::parallel::ParallelIntegrator;
use crate::sequential::SequentialIntegrator;
use crate::state::SimulationState;

/// Totals reported by one integration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegrationReport {
    /// Free nodes updated.
    pub integrated: usize,
    /// Spring terms skipped for coincident endpoints.
    pub skipped_contributions: u32,
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Tick counter after this step.
    pub tick: u64,
    /// Anchors moved by the excitation phase.
    pub excited: usize,
    /// Free nodes integrated.
    pub integrated: usize,
    /// Spring terms skipped because two nodes coincided.
    pub skipped_contributions: u32,
    /// True when `run_simulation` was off and nothing changed.
    pub paused: bool,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

impl StepResult {
    /// Result of a tick that did nothing.
    pub fn paused(tick: u64) -> Self {
        Self {
            tick,
            excited: 0,
            integrated: 0,
            skipped_contributions: 0,
            paused: true,
            wall_time: 0.0,
        }
    }
}

/// Trait for free-node integrators.
///
/// # Implementations
///
/// - [`SequentialIntegrator`]: one thread, index order
/// - [`ParallelIntegrator`]: strided partition over a rayon pool
pub trait IntegratorStrategy: Send {
    /// Integration phase: updates every free node's position and velocity
    /// from the snapshot. Anchors must be left untouched.
    fn integrate(
        &mut self,
        graph: &Graph,
        state: &mut SimulationState,
        params: &SimParams,
    ) -> IntegrationReport;

    /// Returns the strategy's name.
    fn name(&self) -> &str;

    /// Threads used by [`integrate`](Self::integrate).
    fn workers(&self) -> usize {
        1
    }

    /// Runs a complete tick: excitation, snapshot, integration.
    fn step(
        &mut self,
        graph: &Graph,
        state: &mut SimulationState,
        params: &SimParams,
        sampler: &dyn TerrainSampler,
    ) -> JounceResult<StepResult> {
        state.check_matches(graph)?;
        if !params.run_simulation {
            return Ok(StepResult::paused(state.tick));
        }

        let start = Instant::now();

        excitation::advance_travel(state, params);
        let excited = excitation::excite_anchors(graph, state, params, sampler);
        state.snapshot(graph);
        let report = self.integrate(graph, state, params);
        state.tick += 1;

        if report.skipped_contributions > 0 {
            tracing::warn!(
                tick = state.tick,
                skipped = report.skipped_contributions,
                "coincident nodes, spring terms skipped"
            );
        }

        Ok(StepResult {
            tick: state.tick,
            excited,
            integrated: report.integrated,
            skipped_contributions: report.skipped_contributions,
            paused: false,
            wall_time: start.elapsed().as_secs_f64(),
        })
    }
}

/// Selects an integrator by name, e.g. from a command line flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Sequential,
    Parallel,
}

impl StrategyKind {
    /// Builds the integrator. `workers` is ignored for the sequential strategy.
    pub fn build(self, workers: usize) -> JounceResult<Box<dyn IntegratorStrategy>> {
        let strategy: Box<dyn IntegratorStrategy> = match self {
            StrategyKind::Sequential => Box::new(SequentialIntegrator::new()),
            StrategyKind::Parallel => Box::new(ParallelIntegrator::new(workers)?),
        };
        Ok(strategy)
    }
}
