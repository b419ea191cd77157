//! # jounce-types
//!
//! Shared types, identifiers, error types, and physical defaults
//! for the jounce vehicle softbody engine.
//!
//! This crate has zero domain logic: it defines the vocabulary
//! that all other jounce crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{JounceError, JounceResult};
pub use ids::{EdgeId, FaceId, NodeId};
