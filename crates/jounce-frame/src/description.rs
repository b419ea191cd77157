//! Serializable topology source.
//!
//! A [`FrameDescription`] is the plain-data form of a frame: a node list,
//! an edge list, and optional faces. It is what external loaders produce
//! and what [`Graph::describe`] emits, so frames can round-trip through
//! JSON or TOML files.

use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use jounce_types::{JounceError, JounceResult};

use crate::graph::{EdgeKind, Graph};

/// A node record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub position: [f64; 3],
    pub mass: f32,
    #[serde(default)]
    pub anchored: bool,
}

/// An edge record. Indices refer to positions in `nodes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub a: usize,
    pub b: usize,
    pub kind: EdgeKind,
}

/// A face record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceRecord {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<[f64; 3]>,
}

/// Complete topology description of a frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameDescription {
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
    #[serde(default)]
    pub faces: Vec<FaceRecord>,
}

impl FrameDescription {
    /// Builds a graph by driving `add_node` / `add_edge` / `add_face` in order.
    ///
    /// Any topology error aborts the whole build; no partial graph escapes.
    pub fn build(&self) -> JounceResult<Graph> {
        let mut graph = Graph::with_capacity(self.nodes.len(), self.edges.len());
        for n in &self.nodes {
            graph.add_node(n.mass, DVec3::from_array(n.position), n.anchored)?;
        }
        for e in &self.edges {
            graph.add_edge(e.a, e.b, e.kind)?;
        }
        for f in &self.faces {
            graph.add_face(f.a, f.b, f.c, f.normal.map(DVec3::from_array))?;
        }
        Ok(graph)
    }

    /// Parses a JSON description.
    pub fn from_json_str(s: &str) -> JounceResult<Self> {
        serde_json::from_str(s).map_err(|e| JounceError::Serialization(format!("frame JSON: {e}")))
    }

    /// Parses a TOML description.
    pub fn from_toml_str(s: &str) -> JounceResult<Self> {
        toml::from_str(s).map_err(|e| JounceError::Serialization(format!("frame TOML: {e}")))
    }

    /// Loads a description from disk, picking the format by extension.
    pub fn load(path: impl AsRef<Path>) -> JounceResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(JounceError::InvalidFrame(format!(
                "unsupported frame format {other:?}; use .json or .toml"
            ))),
        }
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> JounceResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| JounceError::Serialization(format!("frame JSON: {e}")))
    }
}

impl Graph {
    /// Returns the plain-data description of this graph.
    pub fn describe(&self) -> FrameDescription {
        FrameDescription {
            nodes: self
                .nodes()
                .iter()
                .map(|n| NodeRecord {
                    position: n.rest_position.to_array(),
                    mass: n.mass,
                    anchored: n.anchored,
                })
                .collect(),
            edges: self
                .edges()
                .iter()
                .map(|e| EdgeRecord {
                    a: e.a.index(),
                    b: e.b.index(),
                    kind: e.kind,
                })
                .collect(),
            faces: self
                .faces()
                .iter()
                .map(|f| FaceRecord {
                    a: f.nodes[0].index(),
                    b: f.nodes[1].index(),
                    c: f.nodes[2].index(),
                    normal: f.normal.map(|n| n.to_array()),
                })
                .collect(),
        }
    }
}
