//! Topological orderings over a `GraphView`.
//!
//! Neither sorter detects cycles. On cyclic input they still return every
//! node exactly once, in an order that is not a valid topological order.

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::GraphView;
use crate::model::{Direction, NodeId};
use crate::Result;

/// Produces an ordering in which every node follows all of its predecessors.
pub trait TopologicalSort {
    fn sort(&self, graph: &dyn GraphView) -> Result<Vec<NodeId>>;
}

/// Which built-in sorter to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortAlgorithm {
    #[default]
    DepthFirst,
    Kahn,
}

impl SortAlgorithm {
    pub fn sorter(self) -> Box<dyn TopologicalSort> {
        match self {
            SortAlgorithm::DepthFirst => Box::new(DepthFirstSort),
            SortAlgorithm::Kahn => Box::new(KahnSort),
        }
    }
}

fn successors(graph: &dyn GraphView, node: NodeId) -> Result<std::vec::IntoIter<NodeId>> {
    let targets: Vec<NodeId> = graph
        .relationships(node, Direction::Outgoing)?
        .into_iter()
        .map(|r| r.dst)
        .collect();
    Ok(targets.into_iter())
}

// ============================================================================
// Depth-first
// ============================================================================

/// Reverse post-order of an iterative DFS along outgoing edges.
///
/// Roots are taken in ascending id order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirstSort;

impl TopologicalSort for DepthFirstSort {
    fn sort(&self, graph: &dyn GraphView) -> Result<Vec<NodeId>> {
        let ids = graph.node_ids()?;
        let mut visited: HashSet<NodeId> = HashSet::with_capacity(ids.len());
        let mut post_order = Vec::with_capacity(ids.len());

        for &root in &ids {
            if !visited.insert(root) {
                continue;
            }

            let mut stack = vec![(root, successors(graph, root)?)];
            loop {
                let Some((node, children)) = stack.last_mut() else { break };
                let node = *node;
                match children.next() {
                    Some(next) => {
                        if visited.insert(next) {
                            let grandchildren = successors(graph, next)?;
                            stack.push((next, grandchildren));
                        }
                    }
                    None => {
                        post_order.push(node);
                        stack.pop();
                    }
                }
            }
        }

        post_order.reverse();
        Ok(post_order)
    }
}

// ============================================================================
// Kahn
// ============================================================================

/// In-degree queue ordering. Sources are released in ascending id order.
#[derive(Debug, Clone, Copy, Default)]
pub struct KahnSort;

impl TopologicalSort for KahnSort {
    fn sort(&self, graph: &dyn GraphView) -> Result<Vec<NodeId>> {
        let ids = graph.node_ids()?;
        let mut indeg: HashMap<NodeId, usize> = HashMap::with_capacity(ids.len());
        for &id in &ids {
            indeg.insert(id, graph.relationships(id, Direction::Incoming)?.len());
        }

        let mut queue: VecDeque<NodeId> = ids.iter().copied().filter(|id| indeg[id] == 0).collect();
        let mut order = Vec::with_capacity(ids.len());

        while let Some(u) = queue.pop_front() {
            order.push(u);
            for rel in graph.relationships(u, Direction::Outgoing)? {
                if let Some(d) = indeg.get_mut(&rel.dst) {
                    *d = d.saturating_sub(1);
                    if *d == 0 {
                        queue.push_back(rel.dst);
                    }
                }
            }
        }

        if order.len() < ids.len() {
            debug!(
                ordered = order.len(),
                total = ids.len(),
                "graph has a cycle, appending unordered nodes"
            );
            let emitted: HashSet<NodeId> = order.iter().copied().collect();
            order.extend(ids.into_iter().filter(|id| !emitted.contains(id)));
        }

        Ok(order)
    }
}
