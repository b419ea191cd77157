//! Colors and display options for captured frames.

use serde::{Deserialize, Serialize};
use jounce_frame::EdgeKind;

/// Linear RGBA.
pub type Rgba = [f32; 4];

pub const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];
pub const RED: Rgba = [0.5, 0.0, 0.0, 1.0];
pub const BLUE: Rgba = [0.0, 0.0, 0.5, 1.0];
pub const YELLOW: Rgba = [0.43, 0.36, 0.11, 1.0];
pub const BROWN: Rgba = [0.30, 0.20, 0.10, 1.0];
pub const GREEN: Rgba = [0.25, 0.28, 0.0, 1.0];
pub const STEEL: Rgba = [0.15, 0.24, 0.26, 1.0];
pub const GREY: Rgba = [0.4, 0.4, 0.4, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub node: Rgba,
    pub anchor: Rgba,
    pub face: Rgba,
    pub chassis: Rgba,
    pub suspension: Rgba,
    pub suspension_inboard: Rgba,
    pub tire: Rgba,
    /// Edge color at zero strain in tension mode.
    pub outline: Rgba,
    pub compression: Rgba,
    pub tension: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            node: GREEN,
            anchor: GREY,
            face: GREEN,
            chassis: STEEL,
            suspension: YELLOW,
            suspension_inboard: BROWN,
            tire: BLACK,
            outline: BLACK,
            compression: RED,
            tension: BLUE,
        }
    }
}

impl Palette {
    pub fn edge_color(&self, kind: EdgeKind) -> Rgba {
        match kind {
            EdgeKind::Chassis => self.chassis,
            EdgeKind::Suspension => self.suspension,
            EdgeKind::SuspensionInboard => self.suspension_inboard,
            EdgeKind::Tire => self.tire,
        }
    }

    /// Outline color blended toward compression or tension by `|strain| / full_scale`.
    pub fn strain_color(&self, strain: f64, full_scale: f64) -> Rgba {
        let target = if strain < 0.0 { self.compression } else { self.tension };
        let t = if full_scale > 0.0 {
            (strain.abs() / full_scale).clamp(0.0, 1.0) as f32
        } else {
            0.0
        };
        let mut out = self.outline;
        for (o, c) in out.iter_mut().zip(target) {
            *o += (c - *o) * t;
        }
        out
    }
}

/// How edges are colored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ColorMode {
    #[default]
    ByKind,
    /// Strain magnitude at which the blend saturates.
    Tension { full_scale: f64 },
}

/// Everything [`RenderFrame::capture`](crate::RenderFrame::capture) needs besides the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameStyle {
    pub palette: Palette,
    pub mode: ColorMode,
    /// Uniform scale on every emitted position.
    pub scale: f32,
    /// Extra scale on face vertices so panels sit just inside the edges.
    pub face_inset: f32,
    pub show_nodes: bool,
    pub show_edges: bool,
    pub show_faces: bool,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            mode: ColorMode::ByKind,
            scale: 0.4,
            face_inset: 0.985,
            show_nodes: true,
            show_edges: true,
            show_faces: true,
        }
    }
}
