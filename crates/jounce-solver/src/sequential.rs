//! Single-threaded integrator.

use jounce_frame::Graph;
use jounce_types::NodeId;

use crate::config::SimParams;
use crate::force::integrate_node;
use crate::state::SimulationState;
use crate::strategy::{IntegrationReport, IntegratorStrategy};

/// Integrates free nodes one after another in index order.
///
/// This is the reference implementation other strategies are checked against.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialIntegrator;

impl SequentialIntegrator {
    pub fn new() -> Self {
        Self
    }
}

impl IntegratorStrategy for SequentialIntegrator {
    fn integrate(
        &mut self,
        graph: &Graph,
        state: &mut SimulationState,
        params: &SimParams,
    ) -> IntegrationReport {
        let (frozen, position, velocity) = state.split_mut();
        let mut report = IntegrationReport::default();

        for (i, node) in graph.nodes().iter().enumerate() {
            if node.anchored {
                continue;
            }
            let update = integrate_node(graph, &frozen, NodeId(i as u32), params);
            position[i] = update.position;
            velocity[i] = update.velocity;
            report.integrated += 1;
            report.skipped_contributions += update.skipped;
        }

        report
    }

    fn name(&self) -> &str {
        "sequential"
    }
}
