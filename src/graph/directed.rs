use crate::graph::traits::{Graph, MutableGraph};
use crate::{Error, Result};
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// A directed graph implementation using adjacency lists
///
/// Vertices are dense ids `0..vertex_count`. An undirected graph is a
/// directed graph with both directions present.
#[derive(Debug, Clone)]
pub struct DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Outgoing edges for each vertex: vertex_id -> [(target_vertex, weight)]
    outgoing_edges: Vec<Vec<(usize, W)>>,
}

impl<W> Default for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Creates a new empty directed graph
    pub fn new() -> Self {
        DirectedGraph {
            outgoing_edges: Vec::new(),
        }
    }

    /// Creates a new directed graph with the specified number of vertices
    pub fn with_capacity(vertices: usize) -> Self {
        DirectedGraph {
            outgoing_edges: vec![Vec::new(); vertices],
        }
    }

    /// Builds a graph from `node -> [(neighbor, weight)]` entries.
    ///
    /// The number of entries fixes the vertex count, so node keys must be
    /// exactly `0..n`. Neighbor order within an entry is preserved.
    ///
    /// ```
    /// use ordered_float::OrderedFloat;
    /// use ripple_sssp::DirectedGraph;
    /// use ripple_sssp::graph::Graph;
    ///
    /// let graph = DirectedGraph::from_adjacency(vec![
    ///     (0, vec![(1, OrderedFloat(2.0))]),
    ///     (1, vec![(0, OrderedFloat(2.0))]),
    /// ]).unwrap();
    /// assert_eq!(graph.edge_count(), 2);
    /// ```
    pub fn from_adjacency<I, J>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, J)>,
        J: IntoIterator<Item = (usize, W)>,
    {
        let entries: Vec<(usize, Vec<(usize, W)>)> = entries
            .into_iter()
            .map(|(node, neighbors)| (node, neighbors.into_iter().collect()))
            .collect();

        let n = entries.len();
        let mut graph = DirectedGraph::with_capacity(n);
        let mut seen = vec![false; n];

        for (node, neighbors) in entries {
            if node >= n || seen[node] {
                return Err(Error::InvalidVertex(node));
            }
            seen[node] = true;

            for (neighbor, weight) in neighbors {
                if neighbor >= n {
                    return Err(Error::InvalidEdge(node, neighbor));
                }
                check_weight(node, neighbor, weight)?;
                graph.add_edge(node, neighbor, weight);
            }
        }

        Ok(graph)
    }

    /// Validate that the graph doesn't have negative weights
    pub fn validate_non_negative(&self) -> bool {
        self.outgoing_edges
            .iter()
            .flatten()
            .all(|(_, weight)| *weight >= W::zero())
    }

    /// Sum of all edge weights in the graph
    pub fn total_weight(&self) -> W {
        self.outgoing_edges
            .iter()
            .flatten()
            .fold(W::zero(), |acc, (_, weight)| acc + *weight)
    }
}

/// Rejects weights that are negative or not finite
pub(crate) fn check_weight<W: Float>(from: usize, to: usize, weight: W) -> Result<()> {
    if !weight.is_finite() {
        return Err(Error::InvalidWeight(from, to));
    }
    if weight < W::zero() {
        return Err(Error::NegativeWeight(weight.to_f64().unwrap_or(f64::NAN)));
    }
    Ok(())
}

impl<W> Graph<W> for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn vertex_count(&self) -> usize {
        self.outgoing_edges.len()
    }

    fn edge_count(&self) -> usize {
        self.outgoing_edges.iter().map(|edges| edges.len()).sum()
    }

    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.outgoing_edges.get(vertex) {
            Some(edges) => Box::new(edges.iter().cloned()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn has_vertex(&self, vertex: usize) -> bool {
        vertex < self.outgoing_edges.len()
    }

    fn has_edge(&self, from: usize, to: usize) -> bool {
        self.get_edge_weight(from, to).is_some()
    }

    fn get_edge_weight(&self, from: usize, to: usize) -> Option<W> {
        self.outgoing_edges
            .get(from)?
            .iter()
            .find(|(target, _)| *target == to)
            .map(|(_, weight)| *weight)
    }
}

impl<W> MutableGraph<W> for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn add_vertex(&mut self) -> usize {
        self.outgoing_edges.push(Vec::new());
        self.outgoing_edges.len() - 1
    }

    fn add_edge(&mut self, from: usize, to: usize, weight: W) -> bool {
        if !self.has_vertex(from) || !self.has_vertex(to) || weight < W::zero() {
            return false;
        }

        let outgoing = &mut self.outgoing_edges[from];

        // Check if edge already exists and update it if it does
        if let Some(edge) = outgoing.iter_mut().find(|(target, _)| *target == to) {
            edge.1 = weight;
        } else {
            outgoing.push((to, weight));
        }

        true
    }

    fn remove_edge(&mut self, from: usize, to: usize) -> bool {
        match self.outgoing_edges.get_mut(from) {
            Some(outgoing) => {
                let len_before = outgoing.len();
                outgoing.retain(|(target, _)| *target != to);
                len_before > outgoing.len()
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;

    #[test]
    fn test_from_adjacency_rejects_sparse_keys() {
        let result = DirectedGraph::from_adjacency(vec![
            (0, vec![(1, OrderedFloat(1.0))]),
            (2, vec![]),
        ]);
        assert_eq!(result.unwrap_err(), Error::InvalidVertex(2));
    }

    #[test]
    fn test_from_adjacency_rejects_unknown_neighbor() {
        let result = DirectedGraph::from_adjacency(vec![(0, vec![(3, OrderedFloat(1.0))])]);
        assert_eq!(result.unwrap_err(), Error::InvalidEdge(0, 3));
    }

    #[test]
    fn test_from_adjacency_rejects_bad_weights() {
        let negative = DirectedGraph::from_adjacency(vec![
            (0, vec![(1, OrderedFloat(-1.0))]),
            (1, vec![]),
        ]);
        assert_eq!(negative.unwrap_err(), Error::NegativeWeight(-1.0));

        let infinite = DirectedGraph::from_adjacency(vec![
            (0, vec![]),
            (1, vec![(0, OrderedFloat(f64::INFINITY))]),
        ]);
        assert_eq!(infinite.unwrap_err(), Error::InvalidWeight(1, 0));
    }

    #[test]
    fn test_add_edge_replaces_weight() {
        let mut graph = DirectedGraph::with_capacity(2);
        assert!(graph.add_edge(0, 1, OrderedFloat(5.0)));
        assert!(graph.add_edge(0, 1, OrderedFloat(3.0)));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.get_edge_weight(0, 1), Some(OrderedFloat(3.0)));
        assert!(!graph.add_edge(0, 2, OrderedFloat(1.0)));
    }

    #[test]
    fn test_undirected_edge_and_total_weight() {
        let mut graph = DirectedGraph::with_capacity(3);
        graph.add_undirected_edge(0, 1, OrderedFloat(2.0));
        graph.add_undirected_edge(1, 2, OrderedFloat(4.5));
        assert!(graph.has_edge(1, 0));
        assert!(graph.has_edge(2, 1));
        assert_eq!(graph.total_weight(), OrderedFloat(13.0));
        assert!(graph.validate_non_negative());
        assert!(graph.remove_edge(0, 1));
        assert!(!graph.remove_edge(0, 1));
    }
}
