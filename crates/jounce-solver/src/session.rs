//! Simulation session: topology, state, parameters and an integrator
//! bundled behind reset / tick / pause.
//!
//! Consumers (renderers, telemetry) read [`Simulation::graph`] and
//! [`Simulation::state`] between ticks. Nothing here is shared across
//! threads while a tick runs.

use glam::DVec3;
use jounce_frame::chassis::{self, ChassisOptions};
use jounce_frame::Graph;
use jounce_terrain::TerrainSampler;
use jounce_types::JounceResult;

use crate::config::SimParams;
use crate::energy::{self, EnergyReport};
use crate::state::SimulationState;
use crate::strategy::{IntegratorStrategy, StepResult};

pub struct Simulation {
    graph: Graph,
    state: SimulationState,
    params: SimParams,
    strategy: Box<dyn IntegratorStrategy>,
}

impl Simulation {
    /// Starts a session with every node at rest at its creation position.
    pub fn new(graph: Graph, params: SimParams, strategy: Box<dyn IntegratorStrategy>) -> Self {
        let state = SimulationState::from_graph(&graph);
        Self {
            graph,
            state,
            params,
            strategy,
        }
    }

    /// Starts a session on the built-in chassis frame, using
    /// `params.chassis_node_mass` for the chassis nodes.
    pub fn chassis(params: SimParams, strategy: Box<dyn IntegratorStrategy>) -> JounceResult<Self> {
        let graph = chassis::build(Self::chassis_options(&params))?;
        Ok(Self::new(graph, params, strategy))
    }

    fn chassis_options(params: &SimParams) -> ChassisOptions {
        ChassisOptions {
            node_mass: params.chassis_node_mass,
            ..Default::default()
        }
    }

    /// Advances one tick. A no-op while paused.
    pub fn tick(&mut self, sampler: &dyn TerrainSampler) -> JounceResult<StepResult> {
        let result = self
            .strategy
            .step(&self.graph, &mut self.state, &self.params, sampler)?;
        tracing::trace!(
            tick = result.tick,
            strategy = self.strategy.name(),
            wall_time = result.wall_time,
            "tick"
        );
        Ok(result)
    }

    /// Replaces the topology with one produced by `build`.
    ///
    /// The new graph is built before anything is touched: on error the
    /// session keeps its previous graph and state unchanged.
    pub fn reset<F>(&mut self, build: F) -> JounceResult<()>
    where
        F: FnOnce() -> JounceResult<Graph>,
    {
        let graph = build()?;
        self.state = SimulationState::from_graph(&graph);
        self.graph = graph;
        tracing::debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "simulation reset"
        );
        Ok(())
    }

    /// Rebuilds the built-in chassis frame with the current chassis mass.
    pub fn reset_chassis(&mut self) -> JounceResult<()> {
        let options = Self::chassis_options(&self.params);
        self.reset(|| chassis::build(options))
    }

    /// Returns every node to rest at its creation position, keeping the topology.
    pub fn restart(&mut self) {
        self.state = SimulationState::from_graph(&self.graph);
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Replaces the parameters. Takes effect at the next tick.
    pub fn set_params(&mut self, params: SimParams) {
        self.params = params;
    }

    /// Sets the mass of every free node.
    pub fn set_chassis_mass(&mut self, mass: f32) {
        self.params.chassis_node_mass = mass;
        for node in self.graph.nodes_mut().iter_mut().filter(|n| !n.anchored) {
            node.mass = mass;
        }
    }

    pub fn pause(&mut self) {
        self.params.run_simulation = false;
    }

    pub fn resume(&mut self) {
        self.params.run_simulation = true;
    }

    pub fn is_running(&self) -> bool {
        self.params.run_simulation
    }

    /// Swaps the integrator. State is untouched.
    pub fn set_strategy(&mut self, strategy: Box<dyn IntegratorStrategy>) {
        self.strategy = strategy;
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Mutable state access for seeding initial conditions.
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn travel_offset(&self) -> DVec3 {
        self.state.travel_offset
    }

    pub fn tick_count(&self) -> u64 {
        self.state.tick
    }

    pub fn energy(&self) -> EnergyReport {
        energy::measure(&self.graph, &self.state, &self.params)
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("nodes", &self.graph.node_count())
            .field("edges", &self.graph.edge_count())
            .field("tick", &self.state.tick)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}
