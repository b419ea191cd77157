//! Procedural frames for scaling tests and benchmarks.

use glam::DVec3;
use jounce_types::constants::ANCHOR_NODE_MASS;
use jounce_types::{JounceError, JounceResult};

use crate::graph::{EdgeKind, Graph};

/// A flat `cols × rows` lattice of free nodes in the XZ plane, braced with
/// diagonals and covered with two faces per cell, hanging from four
/// anchors placed one `spacing` below its corners.
///
/// Anchors come first in wheel order (front-left, front-right, rear-left,
/// rear-right; front is +Z, left is -X), so the result satisfies the same
/// layout contract as the built-in chassis. Free node `(c, r)` has index
/// `4 + r * cols + c`.
pub fn lattice(cols: usize, rows: usize, spacing: f64, node_mass: f32) -> JounceResult<Graph> {
    if cols < 2 || rows < 2 {
        return Err(JounceError::InvalidFrame(format!(
            "lattice needs at least 2x2 nodes, got {cols}x{rows}"
        )));
    }

    let cells = (cols - 1) * (rows - 1);
    let mut g = Graph::with_capacity(4 + cols * rows, 3 * cells + cols + rows + 12);

    let x_max = (cols - 1) as f64 * spacing;
    let z_max = (rows - 1) as f64 * spacing;
    let corners = [(0, rows - 1), (cols - 1, rows - 1), (0, 0), (cols - 1, 0)];
    for (c, r) in corners {
        let x = if c == 0 { 0.0 } else { x_max };
        let z = if r == 0 { 0.0 } else { z_max };
        g.add_node(ANCHOR_NODE_MASS, DVec3::new(x, -spacing, z), true)?;
    }

    let at = |c: usize, r: usize| 4 + r * cols + c;
    for r in 0..rows {
        for c in 0..cols {
            let p = DVec3::new(c as f64 * spacing, 0.0, r as f64 * spacing);
            g.add_node(node_mass, p, false)?;
        }
    }

    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                g.add_edge(at(c, r), at(c + 1, r), EdgeKind::Chassis)?;
            }
            if r + 1 < rows {
                g.add_edge(at(c, r), at(c, r + 1), EdgeKind::Chassis)?;
            }
            if c + 1 < cols && r + 1 < rows {
                g.add_edge(at(c, r), at(c + 1, r + 1), EdgeKind::Chassis)?;
                g.add_face(at(c, r), at(c + 1, r), at(c + 1, r + 1), None)?;
                g.add_face(at(c, r), at(c + 1, r + 1), at(c, r + 1), None)?;
            }
        }
    }

    for (anchor, (c, r)) in corners.into_iter().enumerate() {
        let inward_c = if c == 0 { 1 } else { c - 1 };
        let inward_r = if r == 0 { 1 } else { r - 1 };
        g.add_edge(anchor, at(c, r), EdgeKind::Suspension)?;
        g.add_edge(anchor, at(inward_c, r), EdgeKind::SuspensionInboard)?;
        g.add_edge(anchor, at(c, inward_r), EdgeKind::SuspensionInboard)?;
    }

    Ok(g)
}
