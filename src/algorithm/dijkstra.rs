use std::fmt::Debug;
use num_traits::{Float, Zero};

use crate::graph::Graph;
use crate::algorithm::{PathResult, ShortestPathAlgorithm, ShortestPathResult};
use crate::algorithm::ripple::SpreadStats;
use crate::data_structures::BinaryHeapWrapper;
use crate::{Error, Result};

/// Classic Dijkstra's algorithm implementation
///
/// Serves as the priority-queue reference that ripple spreading is checked
/// and benchmarked against.
#[derive(Debug, Default)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }

    /// Compute shortest paths from a source vertex to all other vertices
    pub fn compute_shortest_paths<W, G>(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>>
    where
        W: Float + Zero + Debug + Copy + Ord,
        G: Graph<W>,
    {
        let (result, _) = self.run(graph, source, None)?;
        Ok(result)
    }

    /// Main loop, stopping early once `target` is settled
    fn run<W, G>(
        &self,
        graph: &G,
        source: usize,
        target: Option<usize>,
    ) -> Result<(ShortestPathResult<W>, usize)>
    where
        W: Float + Zero + Debug + Copy + Ord,
        G: Graph<W>,
    {
        if !graph.has_vertex(source) {
            return Err(Error::InvalidVertex(source));
        }

        let n = graph.vertex_count();

        // Initialize distances and predecessors
        let mut distances: Vec<Option<W>> = vec![None; n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        let mut pops = 0;

        // Distance to source is 0
        distances[source] = Some(W::zero());

        let mut queue = BinaryHeapWrapper::new();
        queue.push(source, W::zero());

        while let Some((u, dist_u)) = queue.pop() {
            pops += 1;

            // If we've already found a shorter path to u, skip
            if let Some(current_dist) = distances[u] {
                if current_dist < dist_u {
                    continue;
                }
            }

            if target == Some(u) {
                break;
            }

            // Relax all outgoing edges
            for (v, weight) in graph.outgoing_edges(u) {
                if weight < W::zero() {
                    return Err(Error::NegativeWeight(weight.to_f64().unwrap_or(f64::NAN)));
                }
                let new_dist = dist_u + weight;

                let should_update = match distances[v] {
                    None => true,
                    Some(current_dist) => new_dist < current_dist,
                };

                if should_update {
                    distances[v] = Some(new_dist);
                    predecessors[v] = Some(u);
                    queue.push(v, new_dist);
                }
            }
        }

        Ok((
            ShortestPathResult {
                distances,
                predecessors,
                source,
            },
            pops,
        ))
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn find_path(&self, graph: &G, source: usize, destination: usize) -> Result<PathResult<W>> {
        if !graph.has_vertex(destination) {
            return Err(Error::InvalidVertex(destination));
        }

        let (tree, pops) = self.run(graph, source, Some(destination))?;
        let stats = SpreadStats {
            iterations: pops,
            ..SpreadStats::default()
        };

        match tree.path_to(destination) {
            Some(path) => Ok(PathResult {
                source,
                destination,
                path,
                length: tree.distances[destination],
                stats,
                trace: Vec::new(),
            }),
            None => Ok(PathResult::infeasible(source, destination, stats)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DirectedGraph, MutableGraph};
    use ordered_float::OrderedFloat;

    #[test]
    fn test_tree_and_point_query_agree() {
        let mut graph = DirectedGraph::with_capacity(4);
        graph.add_edge(0, 1, OrderedFloat(4.0));
        graph.add_edge(0, 2, OrderedFloat(1.0));
        graph.add_edge(2, 1, OrderedFloat(2.0));
        graph.add_edge(1, 3, OrderedFloat(1.0));

        let dijkstra = Dijkstra::new();
        let tree = dijkstra.compute_shortest_paths(&graph, 0).unwrap();
        assert_eq!(tree.distances[3], Some(OrderedFloat(4.0)));
        assert_eq!(tree.path_to(3), Some(vec![0, 2, 1, 3]));

        let point = dijkstra.find_path(&graph, 0, 3).unwrap();
        assert_eq!(point.path, vec![0, 2, 1, 3]);
        assert_eq!(point.length, Some(OrderedFloat(4.0)));
    }

    #[test]
    fn test_unreachable_is_infeasible() {
        let mut graph = DirectedGraph::with_capacity(3);
        graph.add_edge(0, 1, OrderedFloat(1.0));

        let result = Dijkstra::new().find_path(&graph, 0, 2).unwrap();
        assert!(!result.is_feasible());
        assert_eq!(result.length, None);
    }
}
