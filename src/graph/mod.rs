//! # Graph View Trait
//!
//! The read-only contract between the algorithms and whatever holds the
//! graph. Algorithms only ever see a `&dyn GraphView`, never a concrete
//! representation.
//!
//! ## Implementations
//!
//! | Graph | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryGraph` | `memory` | In-memory property graph for testing/embedding |

pub mod memory;

use crate::model::*;
use crate::Result;

pub use memory::MemoryGraph;

// ============================================================================
// GraphView Trait
// ============================================================================

/// Read-only view over a directed property graph.
///
/// Enumeration order must be stable between calls on an unchanged graph.
/// Implementations are expected to return nodes in ascending id order so
/// that results are reproducible.
pub trait GraphView {
    /// Ids of every node in the graph.
    fn node_ids(&self) -> Result<Vec<NodeId>>;

    /// Get a node by ID. Returns None if not found.
    fn node(&self, id: NodeId) -> Result<Option<Node>>;

    /// Relationships of a node in the given direction.
    ///
    /// `Direction::Incoming` yields the entering edges of `node`.
    /// A self-loop is reported once for `Direction::Both`.
    fn relationships(&self, node: NodeId, dir: Direction) -> Result<Vec<Relationship>>;

    /// Every relationship in the graph.
    ///
    /// Default: collects the outgoing relationships of every node.
    fn all_relationships(&self) -> Result<Vec<Relationship>> {
        let mut result = Vec::new();
        for id in self.node_ids()? {
            result.extend(self.relationships(id, Direction::Outgoing)?);
        }
        Ok(result)
    }

    /// Total number of nodes.
    fn node_count(&self) -> Result<u64> {
        Ok(self.node_ids()?.len() as u64)
    }
}
