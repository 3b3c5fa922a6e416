use crate::graph::{DirectedGraph, MutableGraph};
use ordered_float::OrderedFloat;
use rand::prelude::*;
use rand::rngs::StdRng;

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generates a connected undirected graph with n vertices.
///
/// A random spanning tree (vertex `i` attaches to some vertex `< i`) guarantees
/// connectivity, then `extra_edges` random chords are added. Weights are whole
/// numbers in `1..=max_weight`, so path lengths stay exact in `f64`.
pub fn generate_random_connected(
    n: usize,
    extra_edges: usize,
    max_weight: u32,
    seed: Option<u64>,
) -> DirectedGraph<OrderedFloat<f64>> {
    assert!(max_weight > 0, "max_weight must be positive");

    let mut rng = make_rng(seed);
    let mut graph = DirectedGraph::with_capacity(n);

    for i in 1..n {
        let parent = rng.gen_range(0..i);
        let weight = OrderedFloat(rng.gen_range(1..=max_weight) as f64);
        graph.add_undirected_edge(i, parent, weight);
    }

    if n > 1 {
        for _ in 0..extra_edges {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            if u != v {
                let weight = OrderedFloat(rng.gen_range(1..=max_weight) as f64);
                graph.add_undirected_edge(u, v, weight);
            }
        }
    }

    graph
}

/// Generates a random directed graph with approximately `edge_factor * n` edges.
///
/// No connectivity is enforced, so some targets are usually unreachable.
pub fn generate_random_directed(
    n: usize,
    edge_factor: f64,
    max_weight: u32,
    seed: Option<u64>,
) -> DirectedGraph<OrderedFloat<f64>> {
    assert!(max_weight > 0, "max_weight must be positive");

    let mut rng = make_rng(seed);
    let mut graph = DirectedGraph::with_capacity(n);
    let num_edges = (edge_factor * n as f64) as usize;

    if n > 1 {
        for _ in 0..num_edges {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            // Avoid self-loops
            if u != v {
                let weight = OrderedFloat(rng.gen_range(1..=max_weight) as f64);
                graph.add_edge(u, v, weight);
            }
        }
    }

    graph
}

/// Generates a width x height grid with 8-connectivity.
///
/// Cardinal moves cost 1.0 and diagonal moves 1.4. Vertex `(x, y)` has id
/// `y * width + x`.
pub fn generate_grid(width: usize, height: usize) -> DirectedGraph<OrderedFloat<f64>> {
    let mut graph = DirectedGraph::with_capacity(width * height);

    let directions = [
        // Cardinal directions (N, E, S, W)
        (0, -1, 1.0), (1, 0, 1.0), (0, 1, 1.0), (-1, 0, 1.0),
        // Diagonal directions (NE, SE, SW, NW)
        (1, -1, 1.4), (1, 1, 1.4), (-1, 1, 1.4), (-1, -1, 1.4),
    ];

    for y in 0..height {
        for x in 0..width {
            let vertex = y * width + x;

            for (dx, dy, cost) in directions {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;

                if nx >= 0 && ny >= 0 && nx < width as i64 && ny < height as i64 {
                    let neighbor = ny as usize * width + nx as usize;
                    graph.add_edge(vertex, neighbor, OrderedFloat(cost));
                }
            }
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn test_connected_graph_is_seeded() {
        let a = generate_random_connected(30, 20, 50, Some(7));
        let b = generate_random_connected(30, 20, 50, Some(7));
        assert_eq!(a.edge_count(), b.edge_count());
        for u in 0..30 {
            let ea: Vec<_> = a.outgoing_edges(u).collect();
            let eb: Vec<_> = b.outgoing_edges(u).collect();
            assert_eq!(ea, eb);
        }
    }

    #[test]
    fn test_grid_degree() {
        let grid = generate_grid(3, 3);
        assert_eq!(grid.vertex_count(), 9);
        // corner has 3 neighbors, center has 8
        assert_eq!(grid.outgoing_edges(0).count(), 3);
        assert_eq!(grid.outgoing_edges(4).count(), 8);
    }
}
