//! # Graph Algorithms
//!
//! Algorithms run against a borrowed [`GraphView`] in two steps: `init`
//! binds the graph, `compute` does the work. Results are then read back
//! through accessors on the algorithm value.

pub mod config;
pub mod longest_path;
pub mod topo;

use crate::graph::GraphView;
use crate::Result;

pub use config::LongestPathConfig;
pub use longest_path::{
    find_longest_path, EngineState, LongestPath, LongestPathResult, DEFAULT_WEIGHT_ATTRIBUTE,
};
pub use topo::{DepthFirstSort, KahnSort, SortAlgorithm, TopologicalSort};

/// Two-phase algorithm over a graph.
pub trait Algorithm<'g> {
    /// Bind the algorithm to a graph and clear any previous results.
    fn init(&mut self, graph: &'g dyn GraphView);

    /// Run the algorithm against the bound graph.
    fn compute(&mut self) -> Result<()>;
}
