//! Longest path in a directed acyclic graph.
//!
//! The engine works in five steps:
//!
//! 1. Scan every relationship for a numeric weight. One missing or
//!    non-numeric weight switches the whole run to hop counting.
//! 2. Seed every node with distance `0.0`.
//! 3. Relax entering edges in topological order, so each node's
//!    predecessors are final before the node itself is visited.
//! 4. Pick the node with the greatest distance as the path end.
//! 5. Walk back through the best predecessor of each node until a path
//!    start is reached, then reverse.
//!
//! Ties in steps 4 and 5 go to the lowest [`NodeId`].
//!
//! Cyclic input is not detected. The engine still terminates on it, but
//! the result is meaningless.
//!
//! ```rust
//! use dag_longest_path::{Algorithm, LongestPath, MemoryGraph, PropertyMap, Value};
//!
//! # fn main() -> dag_longest_path::Result<()> {
//! let graph = MemoryGraph::new();
//! let a = graph.create_node(&["Task"], PropertyMap::new());
//! let b = graph.create_node(&["Task"], PropertyMap::new());
//! let mut props = PropertyMap::new();
//! props.insert("weight".into(), Value::from(3.0));
//! graph.create_relationship(a, b, "THEN", props)?;
//!
//! let mut engine = LongestPath::new();
//! engine.init(&graph);
//! engine.compute()?;
//! assert_eq!(engine.longest_path_list(), &[a, b]);
//! assert_eq!(engine.longest_path_value(), 3.0);
//! # Ok(())
//! # }
//! ```

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::config::LongestPathConfig;
use super::topo::TopologicalSort;
use super::Algorithm;
use crate::graph::GraphView;
use crate::model::{Direction, NodeId, Path, Relationship};
use crate::{Error, Result};

/// Relationship property read for weights unless configured otherwise.
pub const DEFAULT_WEIGHT_ATTRIBUTE: &str = "weight";

/// Lifecycle of a [`LongestPath`] engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No graph bound.
    Uninitialized,
    /// Graph bound, nothing computed yet.
    Initialized,
    /// Distances and path available.
    Computed,
}

/// Outcome of one `compute()` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongestPathResult {
    /// Path nodes from start to end. Empty only for an empty graph.
    pub nodes: Vec<NodeId>,
    /// Weight sum of the path, or its hop count when `weighted` is false.
    pub value: f64,
    /// Whether every relationship carried a numeric weight.
    pub weighted: bool,
}

impl LongestPathResult {
    fn empty(weighted: bool) -> Self {
        Self { nodes: Vec::new(), value: 0.0, weighted }
    }

    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn end(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Number of node-to-node steps on the path.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

// ============================================================================
// Per-run state
// ============================================================================

/// Working state of a single computation.
struct Computation {
    distances: HashMap<NodeId, f64>,
    weighted: bool,
}

impl Computation {
    /// Weight detection and distance seeding.
    fn initialize(graph: &dyn GraphView, weight_attribute: &str) -> Result<Self> {
        let ids = graph.node_ids()?;
        let mut distances = HashMap::with_capacity(ids.len());
        let mut weighted = true;

        for id in ids {
            for rel in graph.relationships(id, Direction::Both)? {
                if weighted && rel.number(weight_attribute).is_nan() {
                    debug!(
                        rel = %rel.id,
                        attribute = weight_attribute,
                        "relationship has no numeric weight, counting hops instead"
                    );
                    weighted = false;
                }
            }
            distances.insert(id, 0.0);
        }

        Ok(Self { distances, weighted })
    }

    fn distance(&self, node: NodeId) -> f64 {
        self.distances.get(&node).copied().unwrap_or(0.0)
    }

    /// Length contributed by one relationship.
    fn step(&self, rel: &Relationship, weight_attribute: &str) -> f64 {
        if self.weighted { rel.number(weight_attribute) } else { 1.0 }
    }

    /// Distance `rel.dst` would get by arriving through `rel`.
    fn reach(&self, rel: &Relationship, weight_attribute: &str) -> f64 {
        self.distance(rel.src) + self.step(rel, weight_attribute)
    }

    fn relax(&mut self, graph: &dyn GraphView, order: &[NodeId], weight_attribute: &str) -> Result<()> {
        for &node in order {
            for rel in graph.relationships(node, Direction::Incoming)? {
                let candidate = self.reach(&rel, weight_attribute);
                let current = self.distances.entry(rel.dst).or_insert(0.0);
                if candidate > *current {
                    trace!(node = %rel.dst, via = %rel.src, distance = candidate, "relaxed");
                    *current = candidate;
                }
            }
        }
        Ok(())
    }

    /// Node with the greatest distance; lowest id on ties.
    fn max_entry(&self) -> Option<(NodeId, f64)> {
        self.distances
            .iter()
            .map(|(&id, &d)| (id, d))
            .fold(None, |best, (id, d)| match best {
                Some((best_id, best_d)) if best_d > d || (best_d == d && best_id < id) => best,
                _ => Some((id, d)),
            })
    }

    /// Entering relationship source whose arrival reaches `node`'s distance.
    ///
    /// Among equally good sources the lowest id wins. `None` marks a path start.
    fn best_predecessor(
        &self,
        graph: &dyn GraphView,
        node: NodeId,
        weight_attribute: &str,
    ) -> Result<Option<NodeId>> {
        let target = self.distance(node);
        let mut best: Option<(NodeId, f64)> = None;

        for rel in graph.relationships(node, Direction::Incoming)? {
            let reach = self.reach(&rel, weight_attribute);
            if reach < target {
                continue;
            }
            best = match best {
                Some((id, r)) if r > reach || (r == reach && id <= rel.src) => best,
                _ => Some((rel.src, reach)),
            };
        }

        Ok(best.map(|(id, _)| id))
    }

    /// Path from some start node to `end`, in forward order.
    fn backtrack(&self, graph: &dyn GraphView, end: NodeId, weight_attribute: &str) -> Result<Vec<NodeId>> {
        let mut path = vec![end];
        let mut current = end;

        // A DAG path visits each node once; the bound only matters on cyclic input.
        while path.len() < self.distances.len() {
            match self.best_predecessor(graph, current, weight_attribute)? {
                Some(pred) => {
                    trace!(node = %current, predecessor = %pred, "backtrack");
                    path.push(pred);
                    current = pred;
                }
                None => break,
            }
        }

        path.reverse();
        Ok(path)
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Longest-path engine bound to one graph at a time.
///
/// Accessors called before a successful `compute()` return an empty path
/// and a value of `0.0`.
pub struct LongestPath<'g> {
    graph: Option<&'g dyn GraphView>,
    sorter: Box<dyn TopologicalSort>,
    weight_attribute: String,
    computation: Option<Computation>,
    result: Option<LongestPathResult>,
}

impl<'g> LongestPath<'g> {
    pub fn new() -> Self {
        Self::with_config(LongestPathConfig::default())
    }

    pub fn with_config(config: LongestPathConfig) -> Self {
        Self {
            graph: None,
            sorter: config.sort.sorter(),
            weight_attribute: config.weight_attribute,
            computation: None,
            result: None,
        }
    }

    /// Use a custom topological ordering.
    pub fn with_sorter(mut self, sorter: Box<dyn TopologicalSort>) -> Self {
        self.sorter = sorter;
        self
    }

    pub fn weight_attribute(&self) -> &str {
        &self.weight_attribute
    }

    /// Takes effect on the next `compute()`.
    pub fn set_weight_attribute(&mut self, attribute: impl Into<String>) {
        self.weight_attribute = attribute.into();
    }

    pub fn state(&self) -> EngineState {
        match (self.graph, &self.result) {
            (None, _) => EngineState::Uninitialized,
            (Some(_), None) => EngineState::Initialized,
            (Some(_), Some(_)) => EngineState::Computed,
        }
    }

    pub fn result(&self) -> Option<&LongestPathResult> {
        self.result.as_ref()
    }

    /// Path nodes from start to end.
    pub fn longest_path_list(&self) -> &[NodeId] {
        self.result.as_ref().map(|r| r.nodes.as_slice()).unwrap_or_default()
    }

    /// Weight sum of the longest path, or its hop count in unweighted mode.
    pub fn longest_path_value(&self) -> f64 {
        self.result.as_ref().map_or(0.0, |r| r.value)
    }

    /// `None` until computed.
    pub fn is_weighted(&self) -> Option<bool> {
        self.computation.as_ref().map(|c| c.weighted)
    }

    /// Longest distance of any path ending at `node`.
    pub fn distance(&self, node: NodeId) -> Option<f64> {
        self.computation.as_ref()?.distances.get(&node).copied()
    }

    /// The longest path with its nodes and the relationships joining them.
    ///
    /// Every parallel relationship between two consecutive path nodes is
    /// included. Returns `None` before `compute()` or for an empty graph.
    pub fn longest_path(&self) -> Result<Option<Path>> {
        let (Some(graph), Some(result)) = (self.graph, &self.result) else {
            return Ok(None);
        };
        if result.nodes.is_empty() {
            return Ok(None);
        }

        let all = graph.all_relationships()?;
        let mut path = Path::default();

        for (i, &id) in result.nodes.iter().enumerate() {
            let node = graph.node(id)?.ok_or_else(|| Error::NotFound(format!("Node {id}")))?;
            path.nodes.push(node);

            if let Some(&next) = result.nodes.get(i + 1) {
                path.relationships.extend(
                    all.iter().filter(|r| r.src == id && r.dst == next).cloned(),
                );
            }
        }

        Ok(Some(path))
    }
}

impl Default for LongestPath<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'g> Algorithm<'g> for LongestPath<'g> {
    fn init(&mut self, graph: &'g dyn GraphView) {
        self.graph = Some(graph);
        self.computation = None;
        self.result = None;
    }

    fn compute(&mut self) -> Result<()> {
        let graph = self.graph.ok_or(Error::NotInitialized)?;
        let attribute = self.weight_attribute.as_str();

        let mut run = Computation::initialize(graph, attribute)?;
        let order = self.sorter.sort(graph)?;
        debug!(nodes = order.len(), weighted = run.weighted, "computing longest path");
        run.relax(graph, &order, attribute)?;

        let result = match run.max_entry() {
            Some((end, value)) => LongestPathResult {
                nodes: run.backtrack(graph, end, attribute)?,
                value,
                weighted: run.weighted,
            },
            None => LongestPathResult::empty(run.weighted),
        };

        debug!(
            value = result.value,
            hops = result.hops(),
            weighted = result.weighted,
            "longest path computed"
        );

        self.computation = Some(run);
        self.result = Some(result);
        Ok(())
    }
}

/// Run [`LongestPath`] once against `graph`.
pub fn find_longest_path(graph: &dyn GraphView, config: LongestPathConfig) -> Result<LongestPathResult> {
    let mut engine = LongestPath::with_config(config);
    engine.init(graph);
    engine.compute()?;
    Ok(engine.result.unwrap_or_else(|| LongestPathResult::empty(true)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::SortAlgorithm;
    use crate::graph::MemoryGraph;
    use crate::model::{PropertyMap, Value};

    fn node(g: &MemoryGraph) -> NodeId {
        g.create_node(&[], PropertyMap::new())
    }

    fn edge(g: &MemoryGraph, src: NodeId, dst: NodeId, weight: Option<f64>) {
        let mut props = PropertyMap::new();
        if let Some(w) = weight {
            props.insert(DEFAULT_WEIGHT_ATTRIBUTE.into(), Value::from(w));
        }
        g.create_relationship(src, dst, "NEXT", props).unwrap();
    }

    /// A -(1)-> B -(2)-> C and A -(5)-> C.
    fn triangle() -> (MemoryGraph, NodeId, NodeId, NodeId) {
        let g = MemoryGraph::new();
        let (a, b, c) = (node(&g), node(&g), node(&g));
        edge(&g, a, b, Some(1.0));
        edge(&g, b, c, Some(2.0));
        edge(&g, a, c, Some(5.0));
        (g, a, b, c)
    }

    #[test]
    fn test_weighted_prefers_heavy_edge() {
        let (g, a, _, c) = triangle();
        let mut lp = LongestPath::new();
        lp.init(&g);
        lp.compute().unwrap();

        assert_eq!(lp.is_weighted(), Some(true));
        assert_eq!(lp.longest_path_list(), &[a, c]);
        assert_eq!(lp.longest_path_value(), 5.0);
    }

    #[test]
    fn test_missing_weight_attribute_counts_hops() {
        let (g, a, b, c) = triangle();
        let mut lp = LongestPath::new();
        lp.set_weight_attribute("duration");
        lp.init(&g);
        lp.compute().unwrap();

        assert_eq!(lp.is_weighted(), Some(false));
        assert_eq!(lp.longest_path_list(), &[a, b, c]);
        assert_eq!(lp.longest_path_value(), 2.0);
    }

    #[test]
    fn test_distances_after_compute() {
        let (g, a, b, c) = triangle();
        let mut lp = LongestPath::new();
        lp.init(&g);
        lp.compute().unwrap();

        assert_eq!(lp.distance(a), Some(0.0));
        assert_eq!(lp.distance(b), Some(1.0));
        assert_eq!(lp.distance(c), Some(5.0));
        assert_eq!(lp.distance(NodeId(999)), None);
    }

    #[test]
    fn test_state_machine() {
        let (g, ..) = triangle();
        let mut lp = LongestPath::new();
        assert_eq!(lp.state(), EngineState::Uninitialized);
        assert!(matches!(lp.compute(), Err(Error::NotInitialized)));

        lp.init(&g);
        assert_eq!(lp.state(), EngineState::Initialized);
        assert!(lp.longest_path_list().is_empty());
        assert_eq!(lp.longest_path_value(), 0.0);
        assert_eq!(lp.longest_path().unwrap(), None);

        lp.compute().unwrap();
        assert_eq!(lp.state(), EngineState::Computed);

        lp.init(&g);
        assert_eq!(lp.state(), EngineState::Initialized);
        assert_eq!(lp.is_weighted(), None);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let (g, a, _, c) = triangle();
        let mut lp = LongestPath::new();
        lp.init(&g);
        lp.compute().unwrap();
        lp.compute().unwrap();

        assert_eq!(lp.longest_path_list(), &[a, c]);
        assert_eq!(lp.longest_path_value(), 5.0);
    }

    #[test]
    fn test_empty_graph() {
        let g = MemoryGraph::new();
        let result = find_longest_path(&g, LongestPathConfig::default()).unwrap();
        assert!(result.nodes.is_empty());
        assert_eq!(result.value, 0.0);
        assert_eq!(result.start(), None);
        assert_eq!(result.hops(), 0);
    }

    #[test]
    fn test_max_entry_tie_goes_to_lowest_id() {
        let g = MemoryGraph::new();
        let ids: Vec<NodeId> = (0..4).map(|_| node(&g)).collect();
        let result = find_longest_path(&g, LongestPathConfig::default()).unwrap();
        assert_eq!(result.nodes, vec![ids[0]]);
    }

    #[test]
    fn test_predecessor_tie_goes_to_lowest_id() {
        // Two equally long branches a -> x -> d and a -> y -> d.
        let g = MemoryGraph::new();
        let (a, x, y, d) = (node(&g), node(&g), node(&g), node(&g));
        edge(&g, a, y, Some(1.0));
        edge(&g, y, d, Some(1.0));
        edge(&g, a, x, Some(1.0));
        edge(&g, x, d, Some(1.0));

        for sort in [SortAlgorithm::DepthFirst, SortAlgorithm::Kahn] {
            let result = find_longest_path(&g, LongestPathConfig::default().with_sort(sort)).unwrap();
            assert_eq!(result.nodes, vec![a, x, d]);
            assert_eq!(result.value, 2.0);
        }
    }

    #[test]
    fn test_negative_weights_stop_backtracking() {
        let g = MemoryGraph::new();
        let (a, b) = (node(&g), node(&g));
        edge(&g, a, b, Some(-3.0));

        let result = find_longest_path(&g, LongestPathConfig::default()).unwrap();
        assert!(result.weighted);
        assert_eq!(result.nodes, vec![a]);
        assert_eq!(result.value, 0.0);
    }

    #[test]
    fn test_cycle_terminates() {
        let g = MemoryGraph::new();
        let (a, b) = (node(&g), node(&g));
        edge(&g, a, b, None);
        edge(&g, b, a, None);

        let result = find_longest_path(&g, LongestPathConfig::default()).unwrap();
        assert!(result.nodes.len() <= 2);
    }

    #[test]
    fn test_longest_path_includes_parallel_edges() {
        let g = MemoryGraph::new();
        let (a, b) = (node(&g), node(&g));
        edge(&g, a, b, Some(2.0));
        edge(&g, a, b, Some(2.0));

        let mut lp = LongestPath::new();
        lp.init(&g);
        lp.compute().unwrap();
        let path = lp.longest_path().unwrap().unwrap();

        assert_eq!(path.node_ids(), vec![a, b]);
        assert_eq!(path.len(), 2);
        assert!(path.relationships.iter().all(|r| r.src == a && r.dst == b));
    }

    struct ReverseIds;

    impl TopologicalSort for ReverseIds {
        fn sort(&self, graph: &dyn GraphView) -> Result<Vec<NodeId>> {
            let mut ids = graph.node_ids()?;
            ids.reverse();
            Ok(ids)
        }
    }

    #[test]
    fn test_custom_sorter_is_used() {
        // Chain built back to front so ascending ids are the reverse of topological order.
        let g = MemoryGraph::new();
        let (c, b, a) = (node(&g), node(&g), node(&g));
        edge(&g, a, b, Some(1.0));
        edge(&g, b, c, Some(1.0));

        let mut lp = LongestPath::new().with_sorter(Box::new(ReverseIds));
        lp.init(&g);
        lp.compute().unwrap();
        assert_eq!(lp.longest_path_list(), &[a, b, c]);
        assert_eq!(lp.longest_path_value(), 2.0);
    }
}
