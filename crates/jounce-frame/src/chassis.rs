//! The built-in four-wheel chassis frame.
//!
//! Layout contract: nodes `0..4` are the anchored wheel control points in the
//! order front-left, front-right, rear-left, rear-right. Chassis nodes follow
//! from index 4. Every table below uses absolute node indices.

use glam::DVec3;
use jounce_types::constants::{ANCHOR_NODE_MASS, DEFAULT_CHASSIS_NODE_MASS, WHEEL_COUNT};
use jounce_types::{JounceError, JounceResult, NodeId};

use crate::graph::{EdgeKind, Graph};

/// Wheel control points, in anchor order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wheel {
    FrontLeft = 0,
    FrontRight = 1,
    RearLeft = 2,
    RearRight = 3,
}

impl Wheel {
    pub const ALL: [Wheel; WHEEL_COUNT] = [
        Wheel::FrontLeft,
        Wheel::FrontRight,
        Wheel::RearLeft,
        Wheel::RearRight,
    ];

    /// The fixed node index of this wheel's anchor.
    #[inline]
    pub fn node(self) -> NodeId {
        NodeId(self as u32)
    }
}

/// Uniform scale applied to the authored chassis coordinates.
pub const CHASSIS_SCALE: f64 = 0.3;

/// Half track width at the rear axle.
const TRACK: f64 = 0.2;

const WHEEL_POINTS: [[f64; 3]; WHEEL_COUNT] = [
    [-TRACK * 0.875, -0.1, 0.6],
    [TRACK * 0.875, -0.1, 0.6],
    [-TRACK, -0.1, -0.25],
    [TRACK, -0.1, -0.25],
];

/// Chassis node coordinates before scaling. Node `4 + i` is entry `i`.
const CHASSIS_POINTS: [[f64; 3]; 50] = [
    [0.609475, -0.203593, -1.521659],
    [0.582503, 0.679409, -0.827076],
    [0.609475, 0.370669, -1.297424],
    [0.722724, 0.335853, -0.004235],
    [0.582503, 0.838015, -0.020722],
    [0.722724, 0.193655, -0.898175],
    [0.541155, -0.110617, -2.046698],
    [0.582503, 0.816138, 0.712224],
    [0.722724, 0.354728, 0.734101],
    [0.722724, 0.343790, 0.734101],
    [0.609475, 0.318445, 1.160695],
    [0.726352, -0.151903, 0.181716],
    [0.609475, -0.140964, 1.204448],
    [0.609475, -0.365200, 0.455174],
    [0.609475, -0.348792, 1.220856],
    [0.210787, 0.816138, 0.838015],
    [0.336924, 0.371136, 1.018497],
    [0.091695, -0.337854, 1.095065],
    [0.534656, 0.329383, 1.822463],
    [0.234896, 0.296568, 1.855278],
    [0.231663, 0.001234, 2.298280],
    [0.609475, -0.069865, 1.477906],
    [-0.609475, -0.203593, -1.521659],
    [-0.609475, 0.370669, -1.297424],
    [-0.722724, 0.335853, -0.004235],
    [-0.582503, 0.838015, -0.020722],
    [-0.722724, 0.193655, -0.898175],
    [-0.582503, 0.679409, -0.827076],
    [-0.541155, -0.110617, -2.046698],
    [-0.582503, 0.816138, 0.712224],
    [-0.722724, 0.354728, 0.734101],
    [-0.722724, 0.343790, 0.734101],
    [-0.609475, 0.318445, 1.160695],
    [-0.726352, -0.151903, 0.181716],
    [-0.609475, -0.140964, 1.204448],
    [-0.609475, -0.365200, 0.455174],
    [-0.609475, -0.348792, 1.220856],
    [-0.609475, -0.069865, 1.477906],
    [-0.210787, 0.816138, 0.838015],
    [-0.336924, 0.371136, 1.018497],
    [-0.091695, -0.337854, 1.095065],
    [-0.534656, 0.329383, 1.822463],
    [-0.234896, 0.296568, 1.855278],
    [-0.231663, 0.001234, 2.298280],
    [0.194168, 0.838015, -0.130058],
    [-0.194168, 0.838015, -0.130058],
    [0.203158, 0.370669, -1.297424],
    [-0.203158, 0.370669, -1.297424],
    [0.194168, 0.679409, -0.827076],
    [-0.194168, 0.679409, -0.827076],
];
const CHASSIS_MEMBERS: [(usize, usize); 161] = [
    (4, 10), (9, 6), (7, 9), (8, 7), (4, 9), (8, 11), (11, 13), (13, 14), (7, 13), (13, 15),
    (7, 15), (9, 15), (13, 16), (15, 16), (16, 17), (15, 17), (16, 18), (17, 18), (11, 14),
    (14, 16), (11, 19), (19, 20), (20, 21), (14, 22), (22, 23), (23, 24), (23, 25), (23, 43),
    (22, 24), (14, 20), (13, 20), (26, 32), (27, 26), (28, 31), (31, 30), (28, 30), (31, 29),
    (29, 28), (27, 32), (26, 30), (29, 33), (33, 35), (35, 36), (28, 35), (35, 37), (28, 37),
    (30, 37), (35, 38), (37, 38), (38, 39), (37, 39), (38, 40), (39, 40), (40, 41), (36, 41),
    (38, 41), (33, 36), (36, 38), (33, 42), (42, 43), (43, 44), (36, 45), (45, 46), (46, 47),
    (20, 46), (41, 47), (45, 47), (41, 45), (36, 43), (35, 43), (43, 46), (20, 23), (20, 43),
    (23, 46), (24, 47), (24, 46), (23, 47), (19, 42), (49, 29), (8, 48), (48, 49), (19, 49),
    (42, 48), (42, 49), (19, 48), (33, 49), (11, 48), (8, 19), (29, 42), (18, 21), (17, 21),
    (40, 44), (39, 44), (21, 44), (17, 39), (8, 39), (17, 29), (30, 49), (9, 48), (5, 48),
    (7, 48), (28, 49), (10, 32), (51, 27), (4, 26), (4, 32), (10, 26), (4, 30), (9, 26),
    (30, 48), (5, 49), (15, 37), (9, 30), (5, 30), (7, 28), (7, 30), (9, 28), (21, 47),
    (24, 44), (44, 47), (21, 24), (50, 51), (5, 52), (52, 53), (50, 52), (51, 53), (10, 51),
    (32, 50), (10, 27), (10, 50), (32, 51), (21, 30), (9, 44), (9, 21), (30, 44), (39, 49),
    (17, 48), (18, 20), (40, 43), (6, 4), (5, 6), (7, 5), (5, 9), (5, 8), (6, 10), (18, 25),
    (14, 25), (16, 25), (25, 24), (25, 22), (31, 27), (30, 27), (46, 41), (31, 49), (6, 32),
    (9, 31), (53, 31), (41, 49), (25, 48), (25, 41), (6, 50),
];
/// Wheel-to-chassis links. The inboard/outboard split mirrors left to right.
const SUSPENSION_LINKS: [(usize, usize, EdgeKind); 64] = [
    (1, 14, EdgeKind::Suspension),
    (1, 16, EdgeKind::Suspension),
    (1, 18, EdgeKind::Suspension),
    (1, 20, EdgeKind::Suspension),
    (1, 21, EdgeKind::Suspension),
    (1, 22, EdgeKind::Suspension),
    (1, 23, EdgeKind::Suspension),
    (1, 24, EdgeKind::Suspension),
    (1, 25, EdgeKind::Suspension),
    (0, 14, EdgeKind::SuspensionInboard),
    (0, 16, EdgeKind::SuspensionInboard),
    (0, 18, EdgeKind::SuspensionInboard),
    (0, 20, EdgeKind::SuspensionInboard),
    (0, 21, EdgeKind::SuspensionInboard),
    (0, 22, EdgeKind::SuspensionInboard),
    (0, 23, EdgeKind::SuspensionInboard),
    (0, 24, EdgeKind::SuspensionInboard),
    (0, 25, EdgeKind::SuspensionInboard),
    (1, 36, EdgeKind::SuspensionInboard),
    (1, 38, EdgeKind::SuspensionInboard),
    (1, 40, EdgeKind::SuspensionInboard),
    (1, 41, EdgeKind::SuspensionInboard),
    (1, 43, EdgeKind::SuspensionInboard),
    (1, 44, EdgeKind::SuspensionInboard),
    (1, 45, EdgeKind::SuspensionInboard),
    (1, 46, EdgeKind::SuspensionInboard),
    (1, 47, EdgeKind::SuspensionInboard),
    (0, 36, EdgeKind::Suspension),
    (0, 38, EdgeKind::Suspension),
    (0, 40, EdgeKind::Suspension),
    (0, 41, EdgeKind::Suspension),
    (0, 43, EdgeKind::Suspension),
    (0, 44, EdgeKind::Suspension),
    (0, 45, EdgeKind::Suspension),
    (0, 46, EdgeKind::Suspension),
    (0, 47, EdgeKind::Suspension),
    (2, 4, EdgeKind::SuspensionInboard),
    (2, 6, EdgeKind::SuspensionInboard),
    (2, 7, EdgeKind::SuspensionInboard),
    (2, 8, EdgeKind::SuspensionInboard),
    (2, 9, EdgeKind::SuspensionInboard),
    (2, 15, EdgeKind::SuspensionInboard),
    (2, 17, EdgeKind::SuspensionInboard),
    (2, 26, EdgeKind::Suspension),
    (2, 27, EdgeKind::Suspension),
    (2, 28, EdgeKind::Suspension),
    (2, 29, EdgeKind::Suspension),
    (2, 30, EdgeKind::Suspension),
    (2, 37, EdgeKind::Suspension),
    (2, 39, EdgeKind::Suspension),
    (3, 4, EdgeKind::Suspension),
    (3, 6, EdgeKind::Suspension),
    (3, 7, EdgeKind::Suspension),
    (3, 8, EdgeKind::Suspension),
    (3, 9, EdgeKind::Suspension),
    (3, 15, EdgeKind::Suspension),
    (3, 17, EdgeKind::Suspension),
    (3, 26, EdgeKind::SuspensionInboard),
    (3, 27, EdgeKind::SuspensionInboard),
    (3, 28, EdgeKind::SuspensionInboard),
    (3, 29, EdgeKind::SuspensionInboard),
    (3, 30, EdgeKind::SuspensionInboard),
    (3, 37, EdgeKind::SuspensionInboard),
    (3, 39, EdgeKind::SuspensionInboard),
];

/// Parameters for building the chassis frame.
#[derive(Debug, Clone, Copy)]
pub struct ChassisOptions {
    pub node_mass: f32,
    pub scale: f64,
}

impl Default for ChassisOptions {
    fn default() -> Self {
        Self {
            node_mass: DEFAULT_CHASSIS_NODE_MASS,
            scale: CHASSIS_SCALE,
        }
    }
}

/// Builds the chassis frame into a fresh graph.
pub fn build(options: ChassisOptions) -> JounceResult<Graph> {
    let mut graph = Graph::with_capacity(
        WHEEL_COUNT + CHASSIS_POINTS.len(),
        CHASSIS_MEMBERS.len() + SUSPENSION_LINKS.len(),
    );

    for p in WHEEL_POINTS {
        graph.add_node(ANCHOR_NODE_MASS, DVec3::from_array(p), true)?;
    }
    for p in CHASSIS_POINTS {
        graph.add_node(options.node_mass, DVec3::from_array(p) * options.scale, false)?;
    }

    for (a, b) in CHASSIS_MEMBERS {
        graph.add_edge(a, b, EdgeKind::Chassis)?;
    }
    for (a, b, kind) in SUSPENSION_LINKS {
        graph.add_edge(a, b, kind)?;
    }

    check_wheel_contract(&graph)?;
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built chassis frame"
    );
    Ok(graph)
}

/// Reset entry point: replaces `graph` with a freshly built chassis frame.
///
/// The new frame is built off to the side; `graph` is only overwritten once
/// construction succeeded, so a failure leaves the previous frame in place.
pub fn load_frame_points(graph: &mut Graph, options: ChassisOptions) -> JounceResult<()> {
    let fresh = build(options)?;
    *graph = fresh;
    Ok(())
}

/// Verifies the first [`WHEEL_COUNT`] nodes are anchored.
pub fn check_wheel_contract(graph: &Graph) -> JounceResult<()> {
    if graph.node_count() < WHEEL_COUNT {
        return Err(JounceError::InvalidFrame(format!(
            "expected at least {WHEEL_COUNT} wheel anchors, found {} nodes",
            graph.node_count()
        )));
    }
    for wheel in Wheel::ALL {
        if !graph.node(wheel.node()).anchored {
            return Err(JounceError::InvalidFrame(format!(
                "{wheel:?} anchor (node {}) is not anchored",
                wheel as usize
            )));
        }
    }
    Ok(())
}
