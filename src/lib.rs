//! Ripple SSSP - point-to-point shortest paths by ripple spreading
//!
//! This library implements the ripple-spreading algorithm (RSA) described in
//! "Deterministic agent-based path optimization by mimicking the spreading of
//! ripples" by Hu et al. (2016).
//!
//! Instead of a priority queue, the search is a discrete simulation: ripples
//! expand from visited nodes at a uniform speed (the minimum edge weight) and
//! the first wavefront to reach an unvisited node spawns a new ripple there.
//! The first ripple to reach the destination carries a shortest path.

pub mod algorithm;
pub mod data_structures;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod graph;
#[cfg(feature = "python")]
mod python;
pub mod web;

pub use algorithm::{
    dijkstra::Dijkstra,
    ripple::{ArrivalRule, RippleSpreading},
    PathResult, ShortestPathAlgorithm, ShortestPathResult,
};
/// Re-export main types for convenient use
pub use graph::directed::DirectedGraph;

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(usize),

    #[error("Invalid edge: from {0} to {1}")]
    InvalidEdge(usize, usize),

    #[error("Negative edge weight: {0}")]
    NegativeWeight(f64),

    #[error("Non-finite edge weight on {0} -> {1}")]
    InvalidWeight(usize, usize),

    #[error("Propagation speed is zero: the graph contains a zero-weight edge")]
    DegenerateSpeed,

    #[error("Ripple spreading did not terminate within {0} iterations")]
    IterationLimit(usize),

    #[error("Algorithm execution error: {0}")]
    AlgorithmError(String),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
