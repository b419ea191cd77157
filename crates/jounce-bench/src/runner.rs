//! Benchmark runner: executes scenarios with an integrator and collects metrics.

use std::time::Instant;

use glam::DVec3;

use jounce_solver::energy;
use jounce_solver::state::SimulationState;
use jounce_solver::strategy::IntegratorStrategy;
use jounce_solver::{ParallelIntegrator, SequentialIntegrator};
use jounce_types::JounceResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Outcome of running one scenario under both strategies.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub sequential: BenchmarkMetrics,
    pub parallel: BenchmarkMetrics,
    /// Largest per-component position difference between the two final states.
    pub max_position_deviation: f64,
    /// Largest per-component velocity difference between the two final states.
    pub max_velocity_deviation: f64,
}

impl Comparison {
    /// True when both strategies produced bit-identical results.
    pub fn identical(&self) -> bool {
        self.max_position_deviation == 0.0 && self.max_velocity_deviation == 0.0
    }
}

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario with the given integrator.
    pub fn run(
        scenario: &Scenario,
        strategy: &mut dyn IntegratorStrategy,
    ) -> JounceResult<BenchmarkMetrics> {
        Self::execute(scenario, strategy).map(|(metrics, _)| metrics)
    }

    fn execute(
        scenario: &Scenario,
        strategy: &mut dyn IntegratorStrategy,
    ) -> JounceResult<(BenchmarkMetrics, SimulationState)> {
        let graph = &scenario.graph;
        let mut state = SimulationState::from_graph(graph);

        let mut step_times: Vec<f64> = Vec::with_capacity(scenario.ticks as usize);
        let mut skipped: u64 = 0;

        let total_start = Instant::now();
        for _ in 0..scenario.ticks {
            let result = strategy.step(graph, &mut state, &scenario.params, &scenario.terrain)?;
            step_times.push(result.wall_time);
            skipped += result.skipped_contributions as u64;
        }
        let total_wall_time = total_start.elapsed().as_secs_f64();

        let max_displacement = graph
            .nodes()
            .iter()
            .zip(&state.position)
            .filter(|(node, _)| !node.anchored)
            .map(|(node, p)| p.distance(node.rest_position))
            .fold(0.0, f64::max);

        let avg_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().sum::<f64>() / step_times.len() as f64
        };
        let min_step = step_times.iter().copied().fold(f64::MAX, f64::min);
        let max_step = step_times.iter().copied().fold(0.0, f64::max);

        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            strategy: strategy.name().to_string(),
            workers: strategy.workers(),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            ticks: scenario.ticks,
            total_wall_time,
            avg_step_time: avg_step,
            min_step_time: min_step,
            max_step_time: max_step,
            final_kinetic_energy: energy::kinetic(graph, &state),
            max_displacement,
            skipped_contributions: skipped,
        };

        tracing::debug!(
            scenario = %metrics.scenario,
            strategy = %metrics.strategy,
            wall_time = metrics.total_wall_time,
            "benchmark run complete"
        );
        Ok((metrics, state))
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all(strategy: &mut dyn IntegratorStrategy) -> JounceResult<Vec<BenchmarkMetrics>> {
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let scenario = Scenario::from_kind(kind)?;
            results.push(Self::run(&scenario, strategy)?);
        }
        Ok(results)
    }

    /// Runs `scenario` sequentially and on `workers` threads and diffs the final states.
    pub fn compare(scenario: &Scenario, workers: usize) -> JounceResult<Comparison> {
        let (sequential, seq_state) = Self::execute(scenario, &mut SequentialIntegrator::new())?;
        let (parallel, par_state) = Self::execute(scenario, &mut ParallelIntegrator::new(workers)?)?;

        Ok(Comparison {
            max_position_deviation: max_deviation(&seq_state.position, &par_state.position),
            max_velocity_deviation: max_deviation(&seq_state.velocity, &par_state.velocity),
            sequential,
            parallel,
        })
    }
}

/// Largest component-wise difference. Bit-identical entries count as zero
/// even when non-finite; any other non-finite difference is infinite.
fn max_deviation(a: &[DVec3], b: &[DVec3]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            if x.to_array().map(f64::to_bits) == y.to_array().map(f64::to_bits) {
                return 0.0;
            }
            let d = (*x - *y).abs();
            if d.is_finite() {
                d.max_element()
            } else {
                f64::INFINITY
            }
        })
        .fold(0.0, f64::max)
}
