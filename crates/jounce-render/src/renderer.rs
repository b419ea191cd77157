//! Renderer trait and HeadlessRenderer stub.
//!
//! The renderer is handed one frame per tick (or per N ticks). It never
//! touches simulation state; everything it needs is in the frame.

use jounce_frame::Graph;
use jounce_types::JounceResult;

use crate::frame::RenderFrame;

/// Trait for rendering simulation output.
pub trait Renderer: Send {
    /// Called once with the topology before the first frame.
    fn init(&mut self, graph: &Graph) -> JounceResult<()>;

    /// Submit a frame for rendering.
    fn submit_frame(&mut self, frame: &RenderFrame) -> JounceResult<()>;

    /// Finalize rendering (flush buffers, close files, etc.).
    fn finalize(&mut self) -> JounceResult<()>;

    fn name(&self) -> &str;

    /// Returns the number of frames submitted.
    fn frame_count(&self) -> u32;
}

/// Counts frames and discards them.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: u32,
    vertices: usize,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices in the most recent frame.
    pub fn last_vertex_count(&self) -> usize {
        self.vertices
    }
}

impl Renderer for HeadlessRenderer {
    fn init(&mut self, _graph: &Graph) -> JounceResult<()> {
        Ok(())
    }

    fn submit_frame(&mut self, frame: &RenderFrame) -> JounceResult<()> {
        self.frames += 1;
        self.vertices = frame.vertex_count();
        Ok(())
    }

    fn finalize(&mut self) -> JounceResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "headless"
    }

    fn frame_count(&self) -> u32 {
        self.frames
    }
}
