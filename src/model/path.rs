//! Path — a sequence of nodes joined by relationships.

use serde::{Deserialize, Serialize};
use super::{Node, NodeId, Relationship};

/// A path in the graph: node -[rel]-> node -[rel]-> node ...
///
/// Normally `relationships` has one element fewer than `nodes`. When the
/// graph holds parallel edges between two consecutive nodes, every one of
/// them is kept, so `relationships` may be longer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    pub nodes: Vec<Node>,
    pub relationships: Vec<Relationship>,
}

impl Path {
    pub fn single(node: Node) -> Self {
        Self { nodes: vec![node], relationships: Vec::new() }
    }

    /// Number of relationships on the path.
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    pub fn start(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn end(&self) -> Option<&Node> {
        self.nodes.last()
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|n| n.id).collect()
    }

    /// Extend path with a relationship and its target node.
    pub fn append(&mut self, rel: Relationship, node: Node) {
        self.relationships.push(rel);
        self.nodes.push(node);
    }

    /// Sum of the named numeric attribute over all relationships.
    ///
    /// `NaN` if any relationship lacks a numeric value for `key`.
    pub fn total(&self, key: &str) -> f64 {
        self.relationships.iter().map(|r| r.number(key)).sum()
    }
}
