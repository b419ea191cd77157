//! Energy accounting for diagnostics and conservation tests.

use serde::{Deserialize, Serialize};
use jounce_frame::Graph;

use crate::config::SimParams;
use crate::state::SimulationState;

/// Energy breakdown of the current state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyReport {
    /// `Σ ½ m |v|²` over free nodes.
    pub kinetic: f64,
    /// `Σ ½ k rest (len / rest - 1)²` over force-carrying edges.
    pub spring: f64,
    /// `Σ m g y` over free nodes.
    pub gravitational: f64,
}

impl EnergyReport {
    pub fn total(&self) -> f64 {
        self.kinetic + self.spring + self.gravitational
    }
}

/// `Σ ½ m |v|²` over free nodes.
pub fn kinetic(graph: &Graph, state: &SimulationState) -> f64 {
    graph
        .nodes()
        .iter()
        .zip(&state.velocity)
        .filter(|(node, _)| !node.anchored)
        .map(|(node, v)| 0.5 * node.mass as f64 * v.length_squared())
        .sum()
}

/// `Σ ½ k rest (len / rest - 1)²` over edges that carry force.
///
/// The negative gradient of this term is exactly the spring force the
/// integrator applies, which scales with the length ratio rather than the
/// absolute extension.
pub fn spring_potential(graph: &Graph, state: &SimulationState, params: &SimParams) -> f64 {
    graph
        .edges()
        .iter()
        .filter_map(|edge| {
            let sd = params.spring_damper(edge.kind)?;
            let strain = edge.strain(&state.position);
            Some(0.5 * sd.stiffness * edge.rest_length * strain * strain)
        })
        .sum()
}

/// `Σ m g y` over free nodes.
pub fn gravitational(graph: &Graph, state: &SimulationState, params: &SimParams) -> f64 {
    graph
        .nodes()
        .iter()
        .zip(&state.position)
        .filter(|(node, _)| !node.anchored)
        .map(|(node, p)| node.mass as f64 * params.gravity * p.y)
        .sum()
}

/// Measures all three terms.
///
/// With zero damping and anchors held still the total is conserved up to
/// integration error.
pub fn measure(graph: &Graph, state: &SimulationState, params: &SimParams) -> EnergyReport {
    EnergyReport {
        kinetic: kinetic(graph, state),
        spring: spring_potential(graph, state, params),
        gravitational: gravitational(graph, state, params),
    }
}
