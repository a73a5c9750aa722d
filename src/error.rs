//! Error types for the weighted push-relabel engine.

use thiserror::Error;

use crate::graph::{EdgeID, NodeID};

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors the solver can signal. See spec §7 for the four kinds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An edge references a vertex id outside `0..n`.
    #[error("edge ({source}, {target}) references unknown vertex (n={n})")]
    UnknownVertex {
        source: NodeID,
        target: NodeID,
        n: usize,
    },

    /// An edge has non-positive capacity.
    #[error("edge ({source}, {target}) has non-positive capacity {capacity}")]
    NonPositiveCapacity {
        source: NodeID,
        target: NodeID,
        capacity: i64,
    },

    /// An edge has u == v.
    #[error("self-loop at vertex {vertex} is not allowed")]
    SelfLoop { vertex: NodeID },

    /// A supply or demand entry is negative.
    #[error("negative {kind} {value} at vertex {vertex}")]
    NegativeSupplyOrDemand {
        kind: &'static str,
        vertex: NodeID,
        value: i64,
    },

    /// h <= 0.
    #[error("height parameter h must be positive, got {h}")]
    NonPositiveHeight { h: i64 },

    /// The vertex set is empty.
    #[error("vertex set must be non-empty")]
    EmptyVertexSet,

    /// The weight oracle returned a non-positive value for some edge.
    #[error("weight oracle returned non-positive weight {weight} for edge {edge}")]
    InvalidWeight { edge: EdgeID, weight: i64 },

    /// The text graph format's header or an edge line didn't parse.
    #[error("malformed input: {reason} ({line:?})")]
    MalformedInput { line: String, reason: &'static str },

    /// The path tracer failed to find a path right after a relabel fixpoint
    /// claimed one must exist. This is a bug in the solver, not in caller
    /// input, and the solve is aborted rather than retried.
    #[error(
        "internal consistency error: no admissible path from excess vertex {source} \
         after relabel fixpoint (iteration {iteration})"
    )]
    InternalConsistency { source: NodeID, iteration: u64 },
}
