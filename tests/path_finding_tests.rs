use ripple_sssp::algorithm::dijkstra::Dijkstra;
use ripple_sssp::algorithm::ripple::RippleSpreading;
use ripple_sssp::algorithm::traits::ShortestPathAlgorithm;
use ripple_sssp::graph::generators::generate_grid;
use ripple_sssp::graph::DirectedGraph;
use ripple_sssp::graph::{Graph, MutableGraph};
use ordered_float::OrderedFloat;
use std::collections::HashMap;

type Weight = OrderedFloat<f64>;

// Remove every edge touching `obstacle`
fn block_vertex(graph: &mut DirectedGraph<Weight>, obstacle: usize) {
    let mut edges_to_remove = Vec::new();
    for v in 0..graph.vertex_count() {
        if graph.has_edge(v, obstacle) {
            edges_to_remove.push((v, obstacle));
        }
        if graph.has_edge(obstacle, v) {
            edges_to_remove.push((obstacle, v));
        }
    }

    for (from, to) in edges_to_remove {
        graph.remove_edge(from, to);
    }
}

// Runs both algorithms and checks that they agree on a valid shortest path
fn assert_same_shortest_path(graph: &DirectedGraph<Weight>, source: usize, target: usize) -> Vec<usize> {
    let ripple = RippleSpreading::new().find_path(graph, source, target).unwrap();
    let dijkstra = Dijkstra::new().find_path(graph, source, target).unwrap();

    assert!(dijkstra.is_feasible(), "Dijkstra should find a path");
    assert!(ripple.is_feasible(), "RippleSpreading should find a path");

    let path = ripple.path;
    assert_eq!(path[0], source, "Path should start at source");
    assert_eq!(path[path.len() - 1], target, "Path should end at target");

    // Verify path continuity
    for i in 1..path.len() {
        assert!(graph.has_edge(path[i - 1], path[i]), "Path should only use existing edges");
    }

    let ripple_length = ripple.length.unwrap().into_inner();
    let dijkstra_length = dijkstra.length.unwrap().into_inner();
    assert!(
        (ripple_length - dijkstra_length).abs() < 1e-9,
        "ripple length {} != dijkstra length {}",
        ripple_length,
        dijkstra_length
    );

    path
}

// Test that paths can be found in a simple grid
#[test]
fn test_path_finding_simple_grid() {
    let graph = generate_grid(10, 10);

    // Top-left corner (0,0) to bottom-right corner (9,9)
    let path = assert_same_shortest_path(&graph, 0, 99);

    // Nine diagonal moves is optimal
    assert_eq!(path.len(), 10);
}

// Test path finding with obstacles
#[test]
fn test_path_finding_with_obstacles() {
    let mut graph = generate_grid(10, 10);

    // Create a wall of obstacles in column 5, open only at the bottom
    for y in 0..8 {
        block_vertex(&mut graph, y * 10 + 5);
    }

    let path = assert_same_shortest_path(&graph, 0, 99);
    assert!(path.iter().all(|v| v % 10 != 5 || v / 10 >= 8), "Path must go around the wall");
}

// A fully closed wall makes the far side unreachable
#[test]
fn test_path_finding_through_closed_wall() {
    let mut graph = generate_grid(6, 6);
    for y in 0..6 {
        block_vertex(&mut graph, y * 6 + 3);
    }

    let result = RippleSpreading::new().find_path(&graph, 0, 35).unwrap();
    assert!(!result.is_feasible());
    let reference = Dijkstra::new().find_path(&graph, 0, 35).unwrap();
    assert!(!reference.is_feasible());
}

// Test the city pathfinding scenario
#[test]
fn test_city_pathfinding() {
    let width = 25;
    let height = 18;
    let mut graph = generate_grid(width, height);

    // Add some buildings as obstacles
    let building_positions = [
        (3, 3), (4, 3), (5, 3),
        (3, 4), (4, 4), (5, 4),
        (3, 5), (4, 5), (5, 5),
        (10, 10), (11, 10), (12, 10),
        (10, 11), (11, 11), (12, 11),
        (10, 12), (11, 12), (12, 12),
    ];

    for &(x, y) in &building_positions {
        block_vertex(&mut graph, y * width + x);
    }

    // Define some key locations
    let locations = HashMap::from([
        ("home".to_string(), (0, 0)),
        ("work".to_string(), (20, 15)),
        ("gym".to_string(), (15, 8)),
        ("park".to_string(), (8, 12)),
    ]);

    for (from_name, &(fx, fy)) in &locations {
        for (to_name, &(tx, ty)) in &locations {
            if from_name != to_name {
                let source = fy * width + fx;
                let target = ty * width + tx;
                let path = assert_same_shortest_path(&graph, source, target);
                assert!(path.len() > 1, "Should find a path from {} to {}", from_name, to_name);
            }
        }
    }
}
