pub mod adjacency;
pub mod csr;
pub mod cycle;
pub mod dijkstra;
pub mod traits;

pub use adjacency::{Adjacent, Neighbors};
pub use csr::{GraphBuilder, GraphCSR};
pub use cycle::DfsCycleDetector;
pub use dijkstra::{LinearScanDijkstra, Settlement, Settlements, ShortestPathTree};
pub use traits::{CycleDetector, ShortestPathSolver};
