//! mbc_fast - maximum group betweenness centrality
//!
//! Finds the k-vertex groups of an undirected, unweighted graph that cover the
//! largest share of shortest paths.
//!
//! ```
//! use mbc_fast::{maximum_betweenness_centrality, Graph, SearchConfig};
//!
//! let graph = Graph::read("4 3\n1 2\n1 3\n1 4\n".as_bytes()).unwrap();
//! let outcome = maximum_betweenness_centrality(&graph, &SearchConfig::new(1)).unwrap();
//! let best = outcome.best().unwrap();
//! assert_eq!(best.one_indexed(), vec![1]);
//! ```

pub mod errors;
pub mod graph;
pub mod leaderboard;
pub mod matrix;
pub mod paths;
pub mod scorer;
pub mod search;

pub use errors::{GbcError, GbcResult};
pub use graph::{Graph, MAX_VERTEX_COUNT};
pub use leaderboard::{Leaderboard, RankedGroup, DEFAULT_LEADERBOARD_SIZE};
pub use paths::{compute_path_counts, DistanceMatrix, PathCountMatrix, PathCounts, MAX_ALL_PAIRS_VERTICES};
pub use scorer::{group_betweenness_centrality, membership_mask, GroupScorer};
pub use search::{maximum_betweenness_centrality, SearchConfig, SearchOutcome};
