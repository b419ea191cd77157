//! # jounce-terrain
//!
//! Scalar fields sampled under each wheel to produce road excitation.
//!
//! The integrator treats a sampler as a black box: a pure function of
//! position, callable concurrently from any thread. Time never enters a
//! sampler directly; the caller advances a travel offset instead.

pub mod perlin;
pub mod sampler;

pub use perlin::PerlinTerrain;
pub use sampler::{FlatTerrain, FnTerrain, TerrainSampler};
