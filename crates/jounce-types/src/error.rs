//! Error types for the jounce engine.
//!
//! All crates return `JounceResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the jounce engine.
#[derive(Debug, Error)]
pub enum JounceError {
    /// An edge or face referenced a node that does not exist yet.
    #[error("Node index {index} is out of range (node count: {count})")]
    NodeOutOfRange {
        index: usize,
        count: usize,
    },

    /// Two linked nodes are (nearly) coincident; the rest length would be unusable.
    #[error("Edge {a}-{b} has degenerate rest length {length:.3e}")]
    DegenerateEdge {
        a: usize,
        b: usize,
        length: f64,
    },

    /// An edge was declared from a node to itself.
    #[error("Edge links node {index} to itself")]
    SelfLoop {
        index: usize,
    },

    /// The graph reached its node-count limit.
    #[error("Node capacity of {limit} exceeded")]
    CapacityExceeded {
        limit: usize,
    },

    /// A topology description is malformed.
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, JounceError>`.
pub type JounceResult<T> = Result<T, JounceError>;
