//! # jounce-render
//!
//! Read-only consumer boundary between the simulation and whatever draws it.
//!
//! After each tick the driver captures a [`RenderFrame`]: flat vertex and
//! color buffers plus draw ranges for nodes, edges and faces, laid out the
//! way a GPU vertex buffer expects them. A [`Renderer`] receives the frames.
//!
//! - [`HeadlessRenderer`]: Counts frames (benchmarks, CI)
//! - [`JsonFrameExporter`]: Writes the animation to a JSON file

pub mod frame;
pub mod json_exporter;
pub mod palette;
pub mod renderer;

pub use frame::{DrawRange, RenderFrame};
pub use json_exporter::JsonFrameExporter;
pub use palette::{ColorMode, FrameStyle, Palette, Rgba};
pub use renderer::{HeadlessRenderer, Renderer};
