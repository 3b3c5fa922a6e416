use std::fmt::Debug;
use num_traits::{Float, Zero};
use crate::algorithm::ripple::{SpreadEvent, SpreadStats};
use crate::graph::Graph;
use crate::Result;

/// Result of a full single-source run (shortest path tree)
#[derive(Debug, Clone)]
pub struct ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Distances from source to each vertex
    pub distances: Vec<Option<W>>,

    /// Predecessor vertices in the shortest path tree
    pub predecessors: Vec<Option<usize>>,

    /// Source vertex ID
    pub source: usize,
}

impl<W> ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Walks the predecessor chain back from `target`.
    ///
    /// Returns `None` when the target is unreachable or the chain is broken.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        if target >= self.predecessors.len() || self.distances[target].is_none() {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = self.predecessors[current]?;
            path.push(current);
            // A chain longer than the vertex count must contain a cycle
            if path.len() > self.predecessors.len() {
                return None;
            }
        }

        path.reverse();
        Some(path)
    }
}

/// Result of a point-to-point query
#[derive(Debug, Clone)]
pub struct PathResult<W> {
    /// Source vertex ID
    pub source: usize,

    /// Destination vertex ID
    pub destination: usize,

    /// Vertices from source to destination inclusive; empty when infeasible
    pub path: Vec<usize>,

    /// Sum of the edge weights along `path`
    pub length: Option<W>,

    /// Counters collected while searching
    pub stats: SpreadStats,

    /// Ripple lifecycle events, only filled when tracing is enabled
    pub trace: Vec<SpreadEvent<W>>,
}

impl<W> PathResult<W> {
    /// The "no feasible solution" outcome
    pub fn infeasible(source: usize, destination: usize, stats: SpreadStats) -> Self {
        PathResult {
            source,
            destination,
            path: Vec::new(),
            length: None,
            stats,
            trace: Vec::new(),
        }
    }

    /// Returns true when a path from source to destination was found
    pub fn is_feasible(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Trait for point-to-point shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    /// Find a shortest path from `source` to `destination`.
    ///
    /// An unreachable destination is `Ok` with an empty path, not an error.
    fn find_path(&self, graph: &G, source: usize, destination: usize) -> Result<PathResult<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;
}
