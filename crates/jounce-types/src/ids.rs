//! Strongly-typed identifiers for graph entities.
//!
//! Newtype wrappers prevent accidental mixing of node indices
//! with edge or face indices. Indices equal insertion order and
//! never change once assigned.

use serde::{Deserialize, Serialize};

/// Index into the graph's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Index into the graph's edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

/// Index into the graph's face list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceId(pub u32);

impl NodeId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl FaceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for NodeId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for EdgeId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for FaceId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}
