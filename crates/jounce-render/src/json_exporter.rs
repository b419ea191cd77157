//! JSON frame exporter: writes the whole animation for offline viewing.
//!
//! Frames are buffered in memory and serialized on `finalize()`. The
//! topology (node count, edge endpoints, draw ranges) is written once;
//! each frame carries its own positions and colors since tension colors
//! change from tick to tick.

use std::path::PathBuf;

use serde::Serialize;
use jounce_frame::Graph;
use jounce_types::{JounceError, JounceResult};

use crate::frame::{DrawRange, RenderFrame};
use crate::renderer::Renderer;

#[derive(Serialize)]
struct FrameData {
    tick: u64,
    positions: Vec<f32>,
    colors: Vec<f32>,
}

#[derive(Serialize)]
struct AnimationData<'a> {
    node_count: usize,
    edge_count: usize,
    face_count: usize,
    /// `[a, b]` node indices per edge.
    edges: &'a [[u32; 2]],
    nodes_range: DrawRange,
    edges_range: DrawRange,
    faces_range: DrawRange,
    frames: &'a [FrameData],
}

/// Exports simulation frames to a JSON file.
///
/// ```text
/// let mut exporter = JsonFrameExporter::new("run.json");
/// exporter.init(sim.graph())?;
/// // ... submit_frame() after each tick ...
/// exporter.finalize()?;
/// ```
pub struct JsonFrameExporter {
    output_path: PathBuf,
    node_count: usize,
    face_count: usize,
    edges: Vec<[u32; 2]>,
    ranges: [DrawRange; 3],
    frames: Vec<FrameData>,
}

impl JsonFrameExporter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            node_count: 0,
            face_count: 0,
            edges: Vec::new(),
            ranges: [DrawRange::default(); 3],
            frames: Vec::new(),
        }
    }

    /// Serializes everything buffered so far.
    pub fn to_json(&self) -> JounceResult<String> {
        let data = AnimationData {
            node_count: self.node_count,
            edge_count: self.edges.len(),
            face_count: self.face_count,
            edges: &self.edges,
            nodes_range: self.ranges[0],
            edges_range: self.ranges[1],
            faces_range: self.ranges[2],
            frames: &self.frames,
        };
        serde_json::to_string(&data)
            .map_err(|e| JounceError::Serialization(format!("JSON serialization failed: {e}")))
    }
}

impl Renderer for JsonFrameExporter {
    fn init(&mut self, graph: &Graph) -> JounceResult<()> {
        self.node_count = graph.node_count();
        self.face_count = graph.face_count();
        self.edges = graph.edges().iter().map(|e| [e.a.0, e.b.0]).collect();
        self.frames.clear();
        Ok(())
    }

    fn submit_frame(&mut self, frame: &RenderFrame) -> JounceResult<()> {
        self.ranges = [frame.nodes, frame.edges, frame.faces];
        self.frames.push(FrameData {
            tick: frame.tick,
            positions: frame.positions.clone(),
            colors: frame.colors.clone(),
        });
        Ok(())
    }

    fn finalize(&mut self) -> JounceResult<()> {
        let json = self.to_json()?;
        std::fs::write(&self.output_path, json)?;
        tracing::info!(
            path = %self.output_path.display(),
            frames = self.frames.len(),
            "wrote animation"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "json_exporter"
    }

    fn frame_count(&self) -> u32 {
        self.frames.len() as u32
    }
}
