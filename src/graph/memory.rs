//! In-memory property graph.
//!
//! This is the reference implementation of `GraphView`.
//! It uses simple HashMaps protected by RwLock.
//!
//! ## Limitations
//!
//! - **Single-writer only**: Per-collection locks mean multi-step mutations
//!   are NOT atomic. Safe for single-threaded or read-heavy use only.
//! - **No cycle checks**: relationships are accepted as given. Algorithms
//!   that need a DAG trust the caller.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use parking_lot::RwLock;
use smallvec::SmallVec;

use crate::model::*;
use crate::{Error, Result};
use super::GraphView;

/// Relationship ids touching a node, in creation order.
type Adjacency = SmallVec<[RelId; 4]>;

// ============================================================================
// MemoryGraph
// ============================================================================

/// In-memory property graph storage.
pub struct MemoryGraph {
    inner: Arc<MemoryInner>,
}

struct MemoryInner {
    nodes: RwLock<HashMap<NodeId, Node>>,
    relationships: RwLock<HashMap<RelId, Relationship>>,
    /// node_id → relationship IDs (both directions)
    adjacency: RwLock<HashMap<NodeId, Adjacency>>,
    next_node_id: AtomicU64,
    next_rel_id: AtomicU64,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                nodes: RwLock::new(HashMap::new()),
                relationships: RwLock::new(HashMap::new()),
                adjacency: RwLock::new(HashMap::new()),
                next_node_id: AtomicU64::new(1),
                next_rel_id: AtomicU64::new(1),
            }),
        }
    }

    // ========================================================================
    // Node CRUD
    // ========================================================================

    /// Create a node with the given labels and properties.
    pub fn create_node(&self, labels: &[&str], props: PropertyMap) -> NodeId {
        let id = NodeId(self.inner.next_node_id.fetch_add(1, Ordering::Relaxed));
        let node = Node {
            id,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            properties: props,
        };

        self.inner.nodes.write().insert(id, node);
        self.inner.adjacency.write().insert(id, Adjacency::new());

        id
    }

    pub fn get_node(&self, id: NodeId) -> Option<Node> {
        self.inner.nodes.read().get(&id).cloned()
    }

    /// Delete a node. Returns true if it existed.
    /// Fails if the node still has relationships.
    pub fn delete_node(&self, id: NodeId) -> Result<bool> {
        {
            let adj = self.inner.adjacency.read();
            if let Some(rels) = adj.get(&id) {
                if !rels.is_empty() {
                    return Err(Error::ConstraintViolation(
                        format!("Cannot delete node {id} with {} relationships. Delete relationships first.", rels.len())
                    ));
                }
            }
        }

        let removed = self.inner.nodes.write().remove(&id);
        self.inner.adjacency.write().remove(&id);
        Ok(removed.is_some())
    }

    // ========================================================================
    // Relationship CRUD
    // ========================================================================

    /// Create a directed relationship `src -> dst`.
    pub fn create_relationship(
        &self,
        src: NodeId,
        dst: NodeId,
        rel_type: &str,
        props: PropertyMap,
    ) -> Result<RelId> {
        {
            let nodes = self.inner.nodes.read();
            if !nodes.contains_key(&src) {
                return Err(Error::NotFound(format!("Source node {src}")));
            }
            if !nodes.contains_key(&dst) {
                return Err(Error::NotFound(format!("Target node {dst}")));
            }
        }

        let id = RelId(self.inner.next_rel_id.fetch_add(1, Ordering::Relaxed));
        let rel = Relationship {
            id,
            src,
            dst,
            rel_type: rel_type.to_string(),
            properties: props,
        };

        self.inner.relationships.write().insert(id, rel);

        let mut adj = self.inner.adjacency.write();
        adj.entry(src).or_default().push(id);
        if src != dst {
            adj.entry(dst).or_default().push(id);
        }

        Ok(id)
    }

    pub fn get_relationship(&self, id: RelId) -> Option<Relationship> {
        self.inner.relationships.read().get(&id).cloned()
    }

    /// Set a property on a relationship (upsert).
    pub fn set_relationship_property(&self, id: RelId, key: &str, val: Value) -> Result<()> {
        let mut rels = self.inner.relationships.write();
        let rel = rels.get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("Relationship {id}")))?;
        rel.properties.insert(key.to_string(), val);
        Ok(())
    }

    pub fn remove_relationship_property(&self, id: RelId, key: &str) -> Result<()> {
        let mut rels = self.inner.relationships.write();
        let rel = rels.get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("Relationship {id}")))?;
        rel.properties.remove(key);
        Ok(())
    }

    /// Delete a relationship. Returns true if it existed.
    pub fn delete_relationship(&self, id: RelId) -> bool {
        let removed = self.inner.relationships.write().remove(&id);
        if let Some(rel) = &removed {
            let mut adj = self.inner.adjacency.write();
            if let Some(rels) = adj.get_mut(&rel.src) {
                rels.retain(|rid| *rid != id);
            }
            if rel.src != rel.dst {
                if let Some(rels) = adj.get_mut(&rel.dst) {
                    rels.retain(|rid| *rid != id);
                }
            }
        }
        removed.is_some()
    }

    pub fn relationship_count(&self) -> u64 {
        self.inner.relationships.read().len() as u64
    }
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// GraphView impl
// ============================================================================

impl GraphView for MemoryGraph {
    fn node_ids(&self) -> Result<Vec<NodeId>> {
        let mut ids: Vec<NodeId> = self.inner.nodes.read().keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn node(&self, id: NodeId) -> Result<Option<Node>> {
        Ok(self.get_node(id))
    }

    fn relationships(&self, node: NodeId, dir: Direction) -> Result<Vec<Relationship>> {
        let adj = self.inner.adjacency.read();
        let rels = self.inner.relationships.read();

        let rel_ids = adj
            .get(&node)
            .ok_or_else(|| Error::NotFound(format!("Node {node}")))?;

        Ok(rel_ids
            .iter()
            .filter_map(|rid| rels.get(rid))
            .filter(|rel| match dir {
                Direction::Outgoing => rel.src == node,
                Direction::Incoming => rel.dst == node,
                Direction::Both => true,
            })
            .cloned()
            .collect())
    }

    fn all_relationships(&self) -> Result<Vec<Relationship>> {
        let mut all: Vec<Relationship> = self.inner.relationships.read().values().cloned().collect();
        all.sort_unstable_by_key(|r| r.id);
        Ok(all)
    }

    fn node_count(&self) -> Result<u64> {
        Ok(self.inner.nodes.read().len() as u64)
    }
}

// ============================================================================
// Tests
// ============================================================================
