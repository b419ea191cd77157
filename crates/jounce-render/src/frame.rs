//! Captured render frames.
//!
//! A frame is one flat vertex list in three consecutive sections:
//!
//! ```text
//! [ nodes: 1 vertex each | edges: 2 vertices each | faces: 3 vertices each ]
//! ```
//!
//! `positions` holds `x, y, z` per vertex and `colors` holds `r, g, b, a`
//! per vertex. Hidden sections have a zero-length range.

use serde::{Deserialize, Serialize};
use jounce_frame::Graph;
use jounce_solver::SimulationState;

use crate::palette::{ColorMode, FrameStyle, Rgba};

/// A contiguous run of vertices, in vertex units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRange {
    pub base: u32,
    pub count: u32,
}

impl DrawRange {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Tick this frame was captured after.
    pub tick: u64,
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub nodes: DrawRange,
    pub edges: DrawRange,
    pub faces: DrawRange,
}

impl RenderFrame {
    /// Builds the vertex and color buffers for the current state.
    pub fn capture(
        tick: u64,
        graph: &Graph,
        state: &SimulationState,
        style: &FrameStyle,
    ) -> Self {
        let mut builder = Builder::with_capacity(
            graph.node_count() + 2 * graph.edge_count() + 3 * graph.face_count(),
        );
        let scale = style.scale as f64;
        let palette = &style.palette;

        let start = builder.len();
        if style.show_nodes {
            for (node, p) in graph.nodes().iter().zip(&state.position) {
                let color = if node.anchored { palette.anchor } else { palette.node };
                builder.push(p.to_array().map(|c| c * scale), color);
            }
        }
        let nodes = builder.range_from(start);

        let start = builder.len();
        if style.show_edges {
            for edge in graph.edges() {
                let color = match style.mode {
                    ColorMode::ByKind => palette.edge_color(edge.kind),
                    ColorMode::Tension { full_scale } => {
                        palette.strain_color(edge.strain(&state.position), full_scale)
                    }
                };
                for end in [edge.a, edge.b] {
                    let p = state.position[end.index()] * scale;
                    builder.push(p.to_array(), color);
                }
            }
        }
        let edges = builder.range_from(start);

        let start = builder.len();
        if style.show_faces {
            let inset = scale * style.face_inset as f64;
            for face in graph.faces() {
                for id in face.nodes {
                    let p = state.position[id.index()] * inset;
                    builder.push(p.to_array(), palette.face);
                }
            }
        }
        let faces = builder.range_from(start);

        Self {
            tick,
            positions: builder.positions,
            colors: builder.colors,
            nodes,
            edges,
            faces,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Position of vertex `i`.
    pub fn vertex(&self, i: usize) -> [f32; 3] {
        [
            self.positions[3 * i],
            self.positions[3 * i + 1],
            self.positions[3 * i + 2],
        ]
    }

    /// Color of vertex `i`.
    pub fn color(&self, i: usize) -> Rgba {
        [
            self.colors[4 * i],
            self.colors[4 * i + 1],
            self.colors[4 * i + 2],
            self.colors[4 * i + 3],
        ]
    }
}

struct Builder {
    positions: Vec<f32>,
    colors: Vec<f32>,
}

impl Builder {
    fn with_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(3 * vertices),
            colors: Vec::with_capacity(4 * vertices),
        }
    }

    fn len(&self) -> usize {
        self.positions.len() / 3
    }

    fn push(&mut self, p: [f64; 3], color: Rgba) {
        self.positions.extend(p.map(|c| c as f32));
        self.colors.extend(color);
    }

    fn range_from(&self, start: usize) -> DrawRange {
        DrawRange {
            base: start as u32,
            count: (self.len() - start) as u32,
        }
    }
}
