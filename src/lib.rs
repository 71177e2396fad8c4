//! # dag-longest-path — Longest paths in property-graph DAGs
//!
//! Finds the longest path in a directed acyclic graph, weighted by a
//! numeric relationship property or, when any weight is missing, by hop
//! count, and reconstructs the nodes and relationships along it.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `GraphView` is the contract between algorithms and graph storage
//! 2. **Clean DTOs**: `Node`, `Relationship`, `Path`, `Value` cross all boundaries
//! 3. **Pluggable ordering**: the topological sort is injected through `TopologicalSort`
//! 4. **Silent fallback**: bad weights downgrade to hop counting instead of failing
//!
//! ## Quick Start
//!
//! ```rust
//! use dag_longest_path::{find_longest_path, LongestPathConfig, MemoryGraph, PropertyMap, Value};
//!
//! # fn main() -> dag_longest_path::Result<()> {
//! let graph = MemoryGraph::new();
//! let fetch = graph.create_node(&["Step"], PropertyMap::new());
//! let build = graph.create_node(&["Step"], PropertyMap::new());
//! let test = graph.create_node(&["Step"], PropertyMap::new());
//!
//! let weight = |w: f64| {
//!     let mut props = PropertyMap::new();
//!     props.insert("weight".into(), Value::from(w));
//!     props
//! };
//! graph.create_relationship(fetch, build, "THEN", weight(2.0))?;
//! graph.create_relationship(build, test, "THEN", weight(3.0))?;
//! graph.create_relationship(fetch, test, "THEN", weight(1.0))?;
//!
//! let result = find_longest_path(&graph, LongestPathConfig::default())?;
//! assert_eq!(result.nodes, vec![fetch, build, test]);
//! assert_eq!(result.value, 5.0);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod graph;
pub mod algorithm;
pub mod export;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Node, Relationship, Path, Value, PropertyMap,
    NodeId, RelId, Direction,
};

// ============================================================================
// Re-exports: Graph
// ============================================================================

pub use graph::{GraphView, MemoryGraph};

// ============================================================================
// Re-exports: Algorithms
// ============================================================================

pub use algorithm::{
    Algorithm, LongestPath, LongestPathConfig, LongestPathResult, EngineState,
    TopologicalSort, SortAlgorithm, DepthFirstSort, KahnSort,
    find_longest_path, DEFAULT_WEIGHT_ATTRIBUTE,
};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Algorithm used before init(): no graph bound")]
    NotInitialized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
