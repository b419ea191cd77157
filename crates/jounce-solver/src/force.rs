//! Per-node force accumulation and semi-implicit Euler update.
//!
//! This is the only place the force model lives. Both integrators call
//! [`integrate_node`] for every free node, which is what makes them
//! produce bit-identical results.

use glam::DVec3;
use jounce_frame::Graph;
use jounce_types::constants::DEGENERATE_DISTANCE;
use jounce_types::NodeId;

use crate::config::SimParams;
use crate::state::Frozen;

/// New kinematic state for one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeUpdate {
    pub position: DVec3,
    pub velocity: DVec3,
    /// Spring terms skipped because the endpoints coincided.
    pub skipped: u32,
}

/// Net force on `node` computed purely from the snapshot.
///
/// Per incident edge: a spring term `-k * dir * (len / rest - 1)` pushing
/// along the edge, and a damping term `-d * v_old` on the node's own
/// velocity. Then gravity `-mass * g` along Y.
pub fn net_force(
    graph: &Graph,
    frozen: &Frozen<'_>,
    node: NodeId,
    params: &SimParams,
) -> (DVec3, u32) {
    let i = node.index();
    let my_pos = frozen.position[i];
    let my_vel = frozen.velocity[i];

    let mut force = DVec3::ZERO;
    let mut skipped = 0;

    for half in graph.half_edges(node) {
        let Some(sd) = params.spring_damper(half.kind) else {
            continue;
        };

        let delta = my_pos - frozen.position[half.other.index()];
        let distance = delta.length();
        if distance > DEGENERATE_DISTANCE {
            let ratio = distance / half.rest_length;
            force += -sd.stiffness * (delta / distance) * (ratio - 1.0);
        } else {
            skipped += 1;
        }

        force -= sd.damping * my_vel;
    }

    let mass = graph.node(node).mass as f64;
    force.y -= mass * params.gravity;

    (force, skipped)
}

/// Integrates one free node over one time step.
///
/// `v' = v_old + (F / m) * dt`, then `p' = p_old + v' * dt`.
#[inline]
pub fn integrate_node(
    graph: &Graph,
    frozen: &Frozen<'_>,
    node: NodeId,
    params: &SimParams,
) -> NodeUpdate {
    let i = node.index();
    let (force, skipped) = net_force(graph, frozen, node, params);
    let mass = graph.node(node).mass as f64;

    let acceleration = force / mass;
    let velocity = frozen.velocity[i] + acceleration * params.time_step;
    let position = frozen.position[i] + velocity * params.time_step;

    NodeUpdate {
        position,
        velocity,
        skipped,
    }
}
