//! Terrain excitation of anchored nodes.
//!
//! Anchors stand in for the tire contact patches. Each tick the travel
//! offset advances through the terrain field and every anchor is moved
//! vertically to follow the sampled road height. X and Z never change.

use glam::DVec3;
use jounce_frame::Graph;
use jounce_terrain::TerrainSampler;

use crate::config::SimParams;
use crate::state::SimulationState;

/// Advances the travel offset by `noise_speed * time_step` along the travel direction.
pub fn advance_travel(state: &mut SimulationState, params: &SimParams) {
    let direction = DVec3::from_array(params.travel_direction);
    state.travel_offset += params.noise_speed * params.time_step * direction;
}

/// Road height offset for one anchor, relative to its rest height.
#[inline]
pub fn road_offset(
    sampler: &dyn TerrainSampler,
    travel_offset: DVec3,
    rest_position: DVec3,
    params: &SimParams,
) -> f64 {
    let p = travel_offset + DVec3::new(rest_position.x, 0.0, rest_position.z);
    params.noise_amplitude * (sampler.sample(p.x, p.y, p.z) - params.noise_bias)
}

/// Excitation phase: sets each anchor to `rest.y + road_offset`, keeping
/// X and Z at their rest values. Returns the number of anchors moved.
pub fn excite_anchors(
    graph: &Graph,
    state: &mut SimulationState,
    params: &SimParams,
    sampler: &dyn TerrainSampler,
) -> usize {
    let mut moved = 0;
    for id in graph.anchors() {
        let rest = graph.node(id).rest_position;
        let dy = road_offset(sampler, state.travel_offset, rest, params);
        state.position[id.index()] = DVec3::new(rest.x, rest.y + dy, rest.z);
        moved += 1;
    }
    moved
}
