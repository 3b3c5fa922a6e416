use ordered_float::OrderedFloat;
use ripple_sssp::{Dijkstra, DirectedGraph, RippleSpreading, ShortestPathAlgorithm};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Five-node road network used to illustrate RSA
    let network = vec![
        (0, vec![(1, 62.0), (2, 44.0), (3, 67.0)]),
        (1, vec![(0, 62.0), (2, 32.0), (4, 52.0)]),
        (2, vec![(0, 44.0), (1, 33.0), (3, 32.0), (4, 52.0)]),
        (3, vec![(0, 67.0), (2, 32.0), (4, 54.0)]),
        (4, vec![(1, 52.0), (2, 52.0), (3, 54.0)]),
    ];
    let graph = DirectedGraph::from_adjacency(network.into_iter().map(|(node, neighbors)| {
        (node, neighbors.into_iter().map(|(n, w)| (n, OrderedFloat(w))).collect::<Vec<_>>())
    }))?;

    let (source, destination) = (0, 4);

    let ripple = RippleSpreading::new().with_trace(true);
    let result = ripple.find_path(&graph, source, destination)?;

    if result.is_feasible() {
        println!("{:?}", result.path);
        println!(
            "length {:.1}, {} steps, {} ripples",
            result.length.map(|l| l.into_inner()).unwrap_or(f64::NAN),
            result.stats.iterations,
            result.stats.ripples_created
        );
    } else {
        println!("No feasible solution!");
    }

    let reference = Dijkstra::new().find_path(&graph, source, destination)?;
    println!(
        "{}: {:?} (length {:.1})",
        <Dijkstra as ShortestPathAlgorithm<OrderedFloat<f64>, DirectedGraph<OrderedFloat<f64>>>>::name(&Dijkstra),
        reference.path,
        reference.length.map(|l| l.into_inner()).unwrap_or(f64::NAN)
    );

    Ok(())
}
