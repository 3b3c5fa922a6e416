pub mod traits;
pub mod directed;
pub mod adjacency;
pub mod generators;

pub use traits::{Graph, MutableGraph};
pub use directed::DirectedGraph;
pub use adjacency::NeighborTable;
