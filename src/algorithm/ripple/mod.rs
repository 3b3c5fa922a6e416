//! Ripple-spreading algorithm (RSA) for point-to-point shortest paths.
//!
//! A seed ripple starts at the source. Every step all active ripples grow by
//! the same amount `v`, the minimum edge weight of the graph. When a ripple's
//! radius covers the edge to an unvisited node, that node gets its own ripple,
//! started with the overshoot so it keeps the correct phase. The first ripple
//! to claim the destination holds a shortest path.
//!
//! Because `v` never exceeds an edge weight, a node with shortest distance `d`
//! is claimed exactly at step `ceil(d / v)`, and among the wavefronts arriving
//! in that step the one with the largest overshoot came over the shortest path.
//!
//! ```
//! use ordered_float::OrderedFloat;
//! use ripple_sssp::{DirectedGraph, RippleSpreading};
//! use ripple_sssp::graph::MutableGraph;
//!
//! let mut graph = DirectedGraph::with_capacity(3);
//! graph.add_undirected_edge(0, 1, OrderedFloat(4.0));
//! graph.add_undirected_edge(1, 2, OrderedFloat(2.0));
//! graph.add_undirected_edge(0, 2, OrderedFloat(7.0));
//!
//! let result = RippleSpreading::new().find_path(&graph, 0, 2).unwrap();
//! assert_eq!(result.path, vec![0, 1, 2]);
//! assert_eq!(result.length, Some(OrderedFloat(6.0)));
//! ```

pub mod engine;
pub mod registry;

use std::fmt::Debug;
use log::{debug, info, warn};
use num_traits::{Float, Zero};
use serde::{Deserialize, Serialize};

use crate::algorithm::{PathResult, ShortestPathAlgorithm};
use crate::graph::{Graph, NeighborTable};
use crate::{Error, Result};

pub use engine::{SpreadState, SpreadingEngine};
pub use registry::{Ripple, RippleId, RippleRegistry};

/// How a ripple decides it has reached a neighbor at distance `w`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalRule {
    /// `radius >= w`, tested against the accumulated radius
    #[default]
    Cumulative,
    /// `w <= radius < w + v`: arrival only counts in the tick the wavefront
    /// crosses `w`. Sensitive to rounding when `w` lands on a tick boundary.
    Window,
}

impl ArrivalRule {
    /// Returns true if a wavefront of `radius` has reached a neighbor at `weight`
    pub fn reaches<W: Float>(self, radius: W, weight: W, speed: W) -> bool {
        match self {
            ArrivalRule::Cumulative => radius >= weight,
            ArrivalRule::Window => weight <= radius && radius < weight + speed,
        }
    }
}

/// Counters collected during one query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SpreadStats {
    /// Simulation steps run
    pub iterations: usize,
    /// Ripples created, including the seed
    pub ripples_created: usize,
    /// Largest size the active set reached
    pub peak_active: usize,
    /// Arrivals at unclaimed nodes, before contention resolution
    pub candidates_considered: usize,
}

/// A ripple lifecycle event, recorded when tracing is on
#[derive(Debug, Clone, PartialEq)]
pub enum SpreadEvent<W> {
    Created {
        step: usize,
        ripple: RippleId,
        epicenter: usize,
        parent: Option<RippleId>,
        radius: W,
        length: W,
    },
    Retired {
        step: usize,
        ripple: RippleId,
        epicenter: usize,
        radius: W,
    },
}

/// Ripple-spreading shortest path search
#[derive(Debug, Clone, Default)]
pub struct RippleSpreading {
    /// Arrival test used by the spreading engine
    arrival_rule: ArrivalRule,
    /// Hard cap on simulation steps; derived from the graph when `None`
    max_iterations: Option<usize>,
    /// Whether to record ripple lifecycle events
    record_trace: bool,
}

impl RippleSpreading {
    /// Create a new instance with the cumulative arrival rule and a derived step cap
    pub fn new() -> Self {
        RippleSpreading::default()
    }

    /// Set the arrival rule
    pub fn with_arrival_rule(mut self, rule: ArrivalRule) -> Self {
        self.arrival_rule = rule;
        self
    }

    /// Set an explicit cap on simulation steps (`None` derives one from the graph)
    pub fn with_max_iterations(mut self, max_iterations: Option<usize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Enable or disable recording of ripple lifecycle events
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.record_trace = enabled;
        self
    }

    pub fn arrival_rule(&self) -> ArrivalRule {
        self.arrival_rule
    }

    /// Find a shortest path on a graph.
    ///
    /// Every weight in the graph is validated, not only those reachable from
    /// `source`. A zero-weight edge anywhere makes the propagation speed zero,
    /// so the query fails with [`Error::DegenerateSpeed`] unless
    /// `source == destination`.
    pub fn find_path<W, G>(&self, graph: &G, source: usize, destination: usize) -> Result<PathResult<W>>
    where
        W: Float + Zero + Debug + Copy,
        G: Graph<W>,
    {
        let table = NeighborTable::build(graph)?;
        self.solve(&table, source, destination)
    }

    /// Find a shortest path on a prebuilt neighbor table.
    ///
    /// Lets repeated queries on one graph skip the validation pass. Zero-weight
    /// edges anywhere in the table are rejected as in [`RippleSpreading::find_path`].
    pub fn solve<W>(&self, table: &NeighborTable<W>, source: usize, destination: usize) -> Result<PathResult<W>>
    where
        W: Float + Zero + Debug + Copy,
    {
        let n = table.node_count();
        if source >= n {
            return Err(Error::InvalidVertex(source));
        }
        if destination >= n {
            return Err(Error::InvalidVertex(destination));
        }

        let speed = match table.speed() {
            Some(speed) => speed,
            None if source == destination => W::one(),
            None => {
                info!("no feasible solution: graph has no edges ({} -> {})", source, destination);
                return Ok(PathResult::infeasible(source, destination, Default::default()));
            }
        };
        if speed <= W::zero() && source != destination {
            return Err(Error::DegenerateSpeed);
        }

        let max_iterations = self
            .max_iterations
            .unwrap_or_else(|| derived_step_cap(table, speed));

        debug!(
            "ripple spreading {} -> {} on {} nodes / {} edges, speed {:?}, rule {:?}, cap {}",
            source,
            destination,
            n,
            table.edge_count(),
            speed,
            self.arrival_rule,
            max_iterations
        );

        let mut engine = SpreadingEngine::new(table, speed, self.arrival_rule, source, destination, self.record_trace);
        let state = engine.run(max_iterations);
        let (registry, stats, trace) = engine.into_parts();

        match state {
            SpreadState::Solved(id) => {
                let length = registry.get(id).map(|ripple| ripple.length);
                let path = registry.path_of(id);
                debug!(
                    "solved {} -> {} in {} steps ({} ripples): {:?}",
                    source, destination, stats.iterations, stats.ripples_created, path
                );
                Ok(PathResult {
                    source,
                    destination,
                    path,
                    length,
                    stats,
                    trace,
                })
            }
            SpreadState::Infeasible => {
                info!(
                    "no feasible solution: {} unreachable from {} ({} steps)",
                    destination, source, stats.iterations
                );
                Ok(PathResult {
                    trace,
                    ..PathResult::infeasible(source, destination, stats)
                })
            }
            SpreadState::Running => {
                warn!(
                    "ripple spreading {} -> {} stopped at the {} step cap",
                    source, destination, max_iterations
                );
                Err(Error::IterationLimit(max_iterations))
            }
        }
    }
}

/// `ceil(total_weight / v) + n + 1`: any simple path is at most the total
/// weight long, and every step either advances toward it or retires ripples.
fn derived_step_cap<W>(table: &NeighborTable<W>, speed: W) -> usize
where
    W: Float + Zero + Debug + Copy,
{
    (table.total_weight() / speed)
        .ceil()
        .to_usize()
        .unwrap_or(usize::MAX)
        .saturating_add(table.node_count() + 1)
}

impl<W, G> ShortestPathAlgorithm<W, G> for RippleSpreading
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "RippleSpreading"
    }

    fn find_path(&self, graph: &G, source: usize, destination: usize) -> Result<PathResult<W>> {
        RippleSpreading::find_path(self, graph, source, destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrival_rules() {
        assert!(ArrivalRule::Cumulative.reaches(5.0, 5.0, 2.0));
        assert!(ArrivalRule::Cumulative.reaches(9.0, 5.0, 2.0));
        assert!(!ArrivalRule::Cumulative.reaches(4.9, 5.0, 2.0));

        assert!(ArrivalRule::Window.reaches(5.0, 5.0, 2.0));
        assert!(ArrivalRule::Window.reaches(6.9, 5.0, 2.0));
        assert!(!ArrivalRule::Window.reaches(7.0, 5.0, 2.0));
        assert!(!ArrivalRule::Window.reaches(4.9, 5.0, 2.0));
    }

    #[test]
    fn test_derived_step_cap() {
        use crate::graph::{DirectedGraph, MutableGraph};

        let mut graph = DirectedGraph::with_capacity(3);
        graph.add_undirected_edge(0, 1, 2.0);
        graph.add_undirected_edge(1, 2, 3.0);
        let table = NeighborTable::build(&graph).unwrap();

        // ceil(10 / 2) + 3 + 1
        assert_eq!(derived_step_cap(&table, 2.0), 9);
    }

    #[test]
    fn test_zero_weight_edge_anywhere_is_rejected() {
        use crate::graph::{DirectedGraph, MutableGraph};

        // 2 -> 3 is unreachable from 0 but still sets the speed to zero
        let mut graph = DirectedGraph::with_capacity(4);
        graph.add_edge(0, 1, 1.0);
        graph.add_edge(2, 3, 0.0);

        let ripple = RippleSpreading::new();
        assert_eq!(ripple.find_path(&graph, 0, 1).unwrap_err(), Error::DegenerateSpeed);
        assert_eq!(ripple.find_path(&graph, 1, 1).unwrap().path, vec![1]);
    }

    #[test]
    fn test_arrival_rule_serde_names() {
        let rule: ArrivalRule = serde_json::from_str("\"window\"").unwrap();
        assert_eq!(rule, ArrivalRule::Window);
        assert_eq!(serde_json::to_string(&ArrivalRule::Cumulative).unwrap(), "\"cumulative\"");
    }
}
