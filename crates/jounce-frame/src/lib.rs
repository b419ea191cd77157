//! # jounce-frame
//!
//! The topology of a deformable vehicle frame: point masses (nodes)
//! joined by typed spring-damper links (edges), plus optional body
//! panels (faces) that carry no physics.
//!
//! ## Key Types
//!
//! - [`Graph`]: Append-only node/edge/face arena. Indices are stable.
//! - [`EdgeKind`]: Selects which stiffness/damping pair an edge uses.
//! - [`HalfEdge`]: One node's oriented view of an incident edge.
//! - [`FrameDescription`]: Serializable topology source (JSON/TOML).
//! - [`chassis`]: The built-in four-wheel chassis frame.
//! - [`generators`]: Procedural lattices for scaling runs.

pub mod chassis;
pub mod description;
pub mod generators;
pub mod graph;

pub use description::FrameDescription;
pub use graph::{Edge, EdgeKind, Face, Graph, HalfEdge, Node};
