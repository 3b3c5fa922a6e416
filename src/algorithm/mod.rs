pub mod traits;
pub mod dijkstra;
pub mod ripple;

pub use traits::{PathResult, ShortestPathAlgorithm, ShortestPathResult};
