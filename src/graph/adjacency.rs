//! Flat neighbor table derived from a [`Graph`].
//!
//! The ripple engine scans the neighbors of every active epicenter on every
//! step, so the adjacency is frozen into compressed sparse row form:
//! neighbors of `u` live at `targets[offsets[u]..offsets[u + 1]]` with the
//! matching weights in the parallel `weights` array.

use crate::graph::directed::check_weight;
use crate::graph::Graph;
use crate::{Error, Result};
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// Immutable CSR adjacency plus the global propagation speed.
#[derive(Debug, Clone)]
pub struct NeighborTable<W> {
    offsets: Vec<usize>,
    targets: Vec<usize>,
    weights: Vec<W>,
    speed: Option<W>,
    total_weight: W,
}

impl<W> NeighborTable<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Freezes the graph, validating every weight as finite and non-negative
    /// and every neighbor id as a vertex of the graph.
    pub fn build<G: Graph<W>>(graph: &G) -> Result<Self> {
        let n = graph.vertex_count();
        let mut offsets = Vec::with_capacity(n + 1);
        let mut targets = Vec::with_capacity(graph.edge_count());
        let mut weights = Vec::with_capacity(graph.edge_count());
        let mut speed: Option<W> = None;
        let mut total_weight = W::zero();

        offsets.push(0);
        for u in 0..n {
            for (v, weight) in graph.outgoing_edges(u) {
                if v >= n {
                    return Err(Error::InvalidEdge(u, v));
                }
                check_weight(u, v, weight)?;
                speed = Some(match speed {
                    Some(current) => current.min(weight),
                    None => weight,
                });
                total_weight = total_weight + weight;
                targets.push(v);
                weights.push(weight);
            }
            offsets.push(targets.len());
        }

        Ok(NeighborTable {
            offsets,
            targets,
            weights,
            speed,
            total_weight,
        })
    }

    /// Number of nodes covered by the table
    pub fn node_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Number of directed edges
    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }

    /// Minimum edge weight over the whole graph, `None` when there are no edges
    pub fn speed(&self) -> Option<W> {
        self.speed
    }

    /// Sum of every edge weight; bounds the length of any simple path
    pub fn total_weight(&self) -> W {
        self.total_weight
    }

    /// Neighbor ids of `node`, in the graph's outgoing-edge order
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.targets[self.offsets[node]..self.offsets[node + 1]]
    }

    /// `(neighbor, weight)` pairs of `node`
    pub fn edges(&self, node: usize) -> impl Iterator<Item = (usize, W)> + '_ {
        let range = self.offsets[node]..self.offsets[node + 1];
        self.targets[range.clone()]
            .iter()
            .copied()
            .zip(self.weights[range].iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DirectedGraph, MutableGraph};
    use ordered_float::OrderedFloat;

    #[test]
    fn test_neighbors_and_speed() {
        let mut graph = DirectedGraph::with_capacity(4);
        graph.add_edge(0, 2, OrderedFloat(7.0));
        graph.add_edge(0, 1, OrderedFloat(3.0));
        graph.add_edge(2, 3, OrderedFloat(1.5));

        let table = NeighborTable::build(&graph).unwrap();
        assert_eq!(table.node_count(), 4);
        assert_eq!(table.edge_count(), 3);
        assert_eq!(table.neighbors(0), &[2, 1]);
        assert!(table.neighbors(1).is_empty());
        assert_eq!(table.speed(), Some(OrderedFloat(1.5)));
        assert_eq!(table.total_weight(), OrderedFloat(11.5));

        let edges: Vec<_> = table.edges(2).collect();
        assert_eq!(edges, vec![(3, OrderedFloat(1.5))]);
    }

    #[test]
    fn test_edgeless_graph_has_no_speed() {
        let graph: DirectedGraph<OrderedFloat<f64>> = DirectedGraph::with_capacity(3);
        let table = NeighborTable::build(&graph).unwrap();
        assert_eq!(table.speed(), None);
        assert_eq!(table.node_count(), 3);
    }

    /// Reports an edge to a vertex it does not have
    #[derive(Debug)]
    struct DanglingGraph;

    impl Graph<OrderedFloat<f64>> for DanglingGraph {
        fn vertex_count(&self) -> usize {
            2
        }

        fn edge_count(&self) -> usize {
            1
        }

        fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, OrderedFloat<f64>)> + '_> {
            if vertex == 0 {
                Box::new(std::iter::once((7, OrderedFloat(1.0))))
            } else {
                Box::new(std::iter::empty())
            }
        }

        fn has_vertex(&self, vertex: usize) -> bool {
            vertex < 2
        }

        fn has_edge(&self, from: usize, to: usize) -> bool {
            from == 0 && to == 7
        }

        fn get_edge_weight(&self, from: usize, to: usize) -> Option<OrderedFloat<f64>> {
            self.has_edge(from, to).then_some(OrderedFloat(1.0))
        }
    }

    #[test]
    fn test_out_of_range_neighbor_is_rejected() {
        assert_eq!(
            NeighborTable::build(&DanglingGraph).unwrap_err(),
            Error::InvalidEdge(0, 7)
        );

        let result = crate::RippleSpreading::new().find_path(&DanglingGraph, 0, 1);
        assert_eq!(result.unwrap_err(), Error::InvalidEdge(0, 7));
    }

    #[test]
    fn test_nan_weight_is_rejected() {
        let mut graph = DirectedGraph::with_capacity(2);
        graph.add_edge(0, 1, f64::NAN);
        assert_eq!(
            NeighborTable::build(&graph).unwrap_err(),
            Error::InvalidWeight(0, 1)
        );
    }
}
