//! Property tests: the engine against brute-force path enumeration.
//!
//! Graphs are generated with edges only from lower to higher node index,
//! so every generated graph is acyclic. Weights are small integers, some
//! negative, so the float sums are exact and path starts can sit behind
//! entering edges that arrive below zero.

use proptest::prelude::*;

use dag_longest_path::{
    Algorithm, GraphView, LongestPath, LongestPathConfig, MemoryGraph, NodeId, PropertyMap,
    SortAlgorithm, Value,
};

/// (from, to, weight) with from < to.
type Edge = (usize, usize, Option<i8>);

fn dag_strategy() -> impl Strategy<Value = (usize, Vec<Edge>)> {
    (1usize..8).prop_flat_map(|n| {
        let edge = (0..n, 0..n, prop::option::weighted(0.9, -5i8..5));
        let edges = prop::collection::vec(edge, 0..16).prop_map(|raw| {
            raw.into_iter()
                .filter(|(i, j, _)| i != j)
                .map(|(i, j, w)| (i.min(j), i.max(j), w))
                .collect::<Vec<Edge>>()
        });
        (Just(n), edges)
    })
}

fn build(n: usize, edges: &[Edge]) -> (MemoryGraph, Vec<NodeId>) {
    let graph = MemoryGraph::new();
    let ids: Vec<NodeId> = (0..n).map(|_| graph.create_node(&[], PropertyMap::new())).collect();
    for &(i, j, w) in edges {
        let mut props = PropertyMap::new();
        if let Some(w) = w {
            props.insert("weight".into(), Value::from(w as i64));
        }
        graph.create_relationship(ids[i], ids[j], "NEXT", props).unwrap();
    }
    (graph, ids)
}

fn step(w: Option<i8>, weighted: bool) -> f64 {
    match (weighted, w) {
        (true, Some(w)) => w as f64,
        _ => 1.0,
    }
}

/// Longest path ending at each node, by enumerating every path.
fn brute_force(n: usize, edges: &[Edge], weighted: bool) -> Vec<f64> {
    fn walk(node: usize, total: f64, out: &[Vec<(usize, f64)>], best: &mut [f64]) {
        best[node] = best[node].max(total);
        for &(next, len) in &out[node] {
            walk(next, total + len, out, best);
        }
    }

    let mut out = vec![Vec::new(); n];
    for &(i, j, w) in edges {
        out[i].push((j, step(w, weighted)));
    }
    let mut best = vec![0.0; n];
    for start in 0..n {
        walk(start, 0.0, &out, &mut best);
    }
    best
}

fn compute(graph: &MemoryGraph, sort: SortAlgorithm) -> LongestPath<'_> {
    let mut engine = LongestPath::with_config(LongestPathConfig::default().with_sort(sort));
    engine.init(graph);
    engine.compute().unwrap();
    engine
}

proptest! {
    #[test]
    fn distances_match_brute_force((n, edges) in dag_strategy()) {
        let (graph, ids) = build(n, &edges);
        let engine = compute(&graph, SortAlgorithm::DepthFirst);
        let weighted = edges.iter().all(|(_, _, w)| w.is_some());

        prop_assert_eq!(engine.is_weighted(), Some(weighted));
        let expected = brute_force(n, &edges, weighted);
        for (i, id) in ids.iter().enumerate() {
            prop_assert_eq!(engine.distance(*id), Some(expected[i]));
        }

        let max = expected.iter().copied().fold(0.0, f64::max);
        prop_assert_eq!(engine.longest_path_value(), max);
    }

    #[test]
    fn reported_path_is_valid_and_sums_to_value((n, edges) in dag_strategy()) {
        let (graph, ids) = build(n, &edges);
        let engine = compute(&graph, SortAlgorithm::DepthFirst);
        let weighted = engine.is_weighted() == Some(true);
        let list = engine.longest_path_list();
        prop_assert!(!list.is_empty());

        let index = |id: NodeId| ids.iter().position(|&x| x == id).unwrap();
        let mut total = 0.0;
        for pair in list.windows(2) {
            let (i, j) = (index(pair[0]), index(pair[1]));
            // Best parallel edge between the pair.
            let len = edges
                .iter()
                .filter(|(s, t, _)| *s == i && *t == j)
                .map(|(_, _, w)| step(*w, weighted))
                .fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(len.is_finite(), "no edge {} -> {}", pair[0], pair[1]);
            total += len;
        }
        prop_assert_eq!(total, engine.longest_path_value());

        if !weighted {
            prop_assert_eq!(engine.longest_path_value(), (list.len() - 1) as f64);
        }

        let path = engine.longest_path().unwrap().unwrap();
        prop_assert_eq!(path.node_ids(), list.to_vec());
        prop_assert!(path.relationships.len() >= list.len() - 1);
    }

    #[test]
    fn sorters_agree((n, edges) in dag_strategy()) {
        let (graph, _) = build(n, &edges);
        let dfs = compute(&graph, SortAlgorithm::DepthFirst);
        let kahn = compute(&graph, SortAlgorithm::Kahn);

        prop_assert_eq!(dfs.longest_path_value(), kahn.longest_path_value());
        prop_assert_eq!(dfs.longest_path_list(), kahn.longest_path_list());
    }

    #[test]
    fn sort_orders_are_topological((n, edges) in dag_strategy()) {
        let (graph, _) = build(n, &edges);
        for algo in [SortAlgorithm::DepthFirst, SortAlgorithm::Kahn] {
            let order = algo.sorter().sort(&graph).unwrap();
            prop_assert_eq!(order.len(), n);
            let pos = |id: NodeId| order.iter().position(|&x| x == id).unwrap();
            for rel in graph.all_relationships().unwrap() {
                prop_assert!(pos(rel.src) < pos(rel.dst));
            }
        }
    }
}
