//! Node/edge graph with index-addressed arenas.
//!
//! Nodes and edges live in flat `Vec`s addressed by [`NodeId`] / [`EdgeId`].
//! Each node keeps the ids of its incident edges (never copies), so the
//! edge arena stays the single source of truth for rest length and kind.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use jounce_types::constants::{MAX_NODES, MIN_REST_LENGTH};
use jounce_types::{EdgeId, FaceId, JounceError, JounceResult, NodeId};

/// Structural class of an edge. Each class maps to one stiffness/damping pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Primary chassis member.
    Chassis,
    /// Outboard suspension link.
    Suspension,
    /// Inboard suspension link. Shares the suspension constants.
    SuspensionInboard,
    /// Reserved tire-contact link. Contributes no force.
    Tire,
}

impl EdgeKind {
    /// All kinds, in declaration order.
    pub fn all() -> &'static [EdgeKind] {
        &[
            EdgeKind::Chassis,
            EdgeKind::Suspension,
            EdgeKind::SuspensionInboard,
            EdgeKind::Tire,
        ]
    }
}

/// A point mass.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Mass, stored narrow for render interop. Widen before force math.
    pub mass: f32,
    /// Position at creation. For anchors this is also the excitation base.
    pub rest_position: DVec3,
    /// Anchored nodes are driven externally, never integrated.
    pub anchored: bool,
    /// Incident edges, in the order they were added.
    pub incident: Vec<EdgeId>,
}

/// A structural link between two nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub kind: EdgeKind,
    /// Distance between the endpoints when the edge was created. Immutable.
    pub rest_length: f64,
    pub a: NodeId,
    pub b: NodeId,
}

impl Edge {
    /// The endpoint that is not `me`.
    #[inline]
    pub fn other(&self, me: NodeId) -> NodeId {
        if self.a == me {
            self.b
        } else {
            self.a
        }
    }

    /// Current length given a position buffer indexed by node.
    pub fn current_length(&self, positions: &[DVec3]) -> f64 {
        positions[self.a.index()].distance(positions[self.b.index()])
    }

    /// `current / rest - 1`: negative in compression, positive in tension.
    pub fn strain(&self, positions: &[DVec3]) -> f64 {
        self.current_length(positions) / self.rest_length - 1.0
    }
}

/// One node's oriented view of an incident edge: `me` first, `other` second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfEdge {
    pub edge: EdgeId,
    pub kind: EdgeKind,
    pub rest_length: f64,
    pub me: NodeId,
    pub other: NodeId,
}

/// A triangular body panel. Render-only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub nodes: [NodeId; 3],
    pub normal: Option<DVec3>,
}

/// Append-only topology arena.
///
/// Insertion order defines node indices; nodes are never reordered or
/// removed, so ids handed out remain valid for the graph's lifetime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with pre-allocated capacity.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            faces: Vec::new(),
        }
    }

    /// Appends a node and returns its stable index.
    pub fn add_node(&mut self, mass: f32, position: DVec3, anchored: bool) -> JounceResult<NodeId> {
        if self.nodes.len() >= MAX_NODES {
            return Err(JounceError::CapacityExceeded { limit: MAX_NODES });
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            mass,
            rest_position: position,
            anchored,
            incident: Vec::new(),
        });
        Ok(id)
    }

    /// Links two existing nodes, freezing the rest length at their current distance.
    ///
    /// Fails with [`JounceError::NodeOutOfRange`] if either index has not been
    /// added yet, and rejects self-loops and near-coincident endpoints. On
    /// failure the graph is left untouched.
    pub fn add_edge(&mut self, a: usize, b: usize, kind: EdgeKind) -> JounceResult<EdgeId> {
        self.check_index(a)?;
        self.check_index(b)?;
        if a == b {
            return Err(JounceError::SelfLoop { index: a });
        }

        let rest_length = self.nodes[a].rest_position.distance(self.nodes[b].rest_position);
        if rest_length.is_nan() || rest_length < MIN_REST_LENGTH {
            return Err(JounceError::DegenerateEdge {
                a,
                b,
                length: rest_length,
            });
        }

        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge {
            kind,
            rest_length,
            a: NodeId(a as u32),
            b: NodeId(b as u32),
        });
        self.nodes[a].incident.push(id);
        self.nodes[b].incident.push(id);
        Ok(id)
    }

    /// Records a body panel over three existing nodes.
    pub fn add_face(
        &mut self,
        a: usize,
        b: usize,
        c: usize,
        normal: Option<DVec3>,
    ) -> JounceResult<FaceId> {
        for i in [a, b, c] {
            self.check_index(i)?;
        }
        let id = FaceId(self.faces.len() as u32);
        self.faces.push(Face {
            nodes: [NodeId(a as u32), NodeId(b as u32), NodeId(c as u32)],
            normal,
        });
        Ok(id)
    }

    fn check_index(&self, index: usize) -> JounceResult<()> {
        if index >= self.nodes.len() {
            return Err(JounceError::NodeOutOfRange {
                index,
                count: self.nodes.len(),
            });
        }
        Ok(())
    }

    /// Drops all nodes, edges, and faces.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.faces.clear();
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Mutable node access for between-tick reconfiguration (e.g. mass).
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Iterates the oriented half-edges of `node`.
    pub fn half_edges(&self, node: NodeId) -> impl Iterator<Item = HalfEdge> + '_ {
        self.nodes[node.index()].incident.iter().map(move |&id| {
            let edge = &self.edges[id.index()];
            HalfEdge {
                edge: id,
                kind: edge.kind,
                rest_length: edge.rest_length,
                me: node,
                other: edge.other(node),
            }
        })
    }

    /// Index of the first non-anchored node, or `node_count()` if all are anchored.
    pub fn first_free(&self) -> usize {
        self.nodes
            .iter()
            .position(|n| !n.anchored)
            .unwrap_or(self.nodes.len())
    }

    /// Ids of all anchored nodes, in index order.
    pub fn anchors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.anchored)
            .map(|(i, _)| NodeId(i as u32))
    }

    /// Rest positions of every node, in index order.
    pub fn rest_positions(&self) -> Vec<DVec3> {
        self.nodes.iter().map(|n| n.rest_position).collect()
    }

    /// Number of edges of each kind, in [`EdgeKind::all`] order.
    pub fn edge_kind_counts(&self) -> [usize; 4] {
        let mut counts = [0usize; 4];
        for e in &self.edges {
            counts[e.kind as usize] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_edges_are_oriented_from_owner() {
        let mut g = Graph::new();
        let a = g.add_node(1.0, DVec3::ZERO, false).unwrap();
        let b = g.add_node(1.0, DVec3::X, false).unwrap();
        g.add_edge(0, 1, EdgeKind::Chassis).unwrap();

        let from_a: Vec<_> = g.half_edges(a).collect();
        let from_b: Vec<_> = g.half_edges(b).collect();
        assert_eq!((from_a[0].me, from_a[0].other), (a, b));
        assert_eq!((from_b[0].me, from_b[0].other), (b, a));
        assert_eq!(from_a[0].rest_length, from_b[0].rest_length);
        assert_eq!(from_a[0].edge, from_b[0].edge);
    }

    #[test]
    fn failed_edge_leaves_graph_untouched() {
        let mut g = Graph::new();
        g.add_node(1.0, DVec3::ZERO, false).unwrap();
        g.add_node(1.0, DVec3::ZERO, false).unwrap();
        assert!(g.add_edge(0, 1, EdgeKind::Chassis).is_err());
        assert_eq!(g.edge_count(), 0);
        assert!(g.nodes().iter().all(|n| n.incident.is_empty()));
    }
}
