use std::time::{Duration, Instant};
use rand::Rng;
use ordered_float::OrderedFloat;
use ripple_sssp::algorithm::{ShortestPathAlgorithm, dijkstra::Dijkstra, ripple::{ArrivalRule, RippleSpreading}};
use ripple_sssp::graph::{DirectedGraph, Graph, generators::generate_random_connected};

type Weight = OrderedFloat<f64>;

// Run every query with one algorithm and report total time and summed path length
fn benchmark_algorithm<A>(
    name: &str,
    algorithm: &A,
    graph: &DirectedGraph<Weight>,
    queries: &[(usize, usize)],
) -> (Duration, f64)
where
    A: ShortestPathAlgorithm<Weight, DirectedGraph<Weight>>,
{
    let start = Instant::now();
    let mut total_length = 0.0;
    let mut failures = 0;

    for &(source, destination) in queries {
        match algorithm.find_path(graph, source, destination) {
            Ok(result) => total_length += result.length.map(|l| l.into_inner()).unwrap_or(0.0),
            Err(err) => {
                failures += 1;
                log::warn!("{} failed on {} -> {}: {}", name, source, destination, err);
            }
        }
    }

    let duration = start.elapsed();
    println!(
        "  - {:<24} {} queries in {:?} ({} failed)",
        name,
        queries.len(),
        duration,
        failures
    );

    (duration, total_length)
}

fn main() {
    env_logger::init();

    let graph_sizes = vec![100, 500, 1_000, 5_000];
    let queries_per_graph = 20;
    let max_weight = 100;

    println!("=====================================================");
    println!("Benchmark: RippleSpreading vs Dijkstra (point-to-point)");
    println!("Edge weights: 1..={}", max_weight);
    println!("=====================================================");

    let dijkstra = Dijkstra::new();
    let ripple = RippleSpreading::new();
    let ripple_window = RippleSpreading::new().with_arrival_rule(ArrivalRule::Window);

    let mut results = Vec::new();
    let mut rng = rand::thread_rng();

    for &size in &graph_sizes {
        println!("\nGenerating connected graph with {} vertices...", size);
        let graph = generate_random_connected(size, size * 2, max_weight, Some(size as u64));
        println!("Graph has {} vertices and {} edges", graph.vertex_count(), graph.edge_count());

        let queries: Vec<(usize, usize)> = (0..queries_per_graph)
            .map(|_| (rng.gen_range(0..size), rng.gen_range(0..size)))
            .collect();

        let (dijkstra_time, dijkstra_total) = benchmark_algorithm("Dijkstra", &dijkstra, &graph, &queries);
        let (ripple_time, ripple_total) = benchmark_algorithm("Ripple (cumulative)", &ripple, &graph, &queries);
        let (window_time, window_total) = benchmark_algorithm("Ripple (window)", &ripple_window, &graph, &queries);

        if (dijkstra_total - ripple_total).abs() > 1e-6 || (dijkstra_total - window_total).abs() > 1e-6 {
            println!(
                "  ! total path lengths differ: dijkstra {:.1}, cumulative {:.1}, window {:.1}",
                dijkstra_total, ripple_total, window_total
            );
        }

        results.push((size, dijkstra_time, ripple_time, window_time));
    }

    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!("{:<10} | {:<15} | {:<15} | {:<15} | {:<10}",
             "Vertices", "Dijkstra (ms)", "Ripple (ms)", "Window (ms)", "Slowdown");
    println!("-----------------------------------------------------");

    for (size, dijkstra_time, ripple_time, window_time) in &results {
        let slowdown = ripple_time.as_secs_f64() / dijkstra_time.as_secs_f64().max(f64::EPSILON);

        println!("{:<10} | {:<15} | {:<15} | {:<15} | {:<10.2}",
                 size,
                 dijkstra_time.as_millis(),
                 ripple_time.as_millis(),
                 window_time.as_millis(),
                 slowdown);
    }
}
