//! Property tests for change propagation over arbitrary import graphs.

use std::collections::HashSet;
use std::path::PathBuf;

use proptest::prelude::*;

use stylewatch::application::watch::rebuild_closure;
use stylewatch::domain::DependencyGraph;

fn node(i: usize) -> PathBuf {
    PathBuf::from(format!("/styles/{i}.less"))
}

/// A graph of `n` nodes with arbitrary edges (cycles included).
fn graph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..12).prop_flat_map(|n| {
        let edges = proptest::collection::vec((0..n, 0..n), 0..(n * 3));
        (Just(n), edges)
    })
}

fn build_graph(n: usize, edges: &[(usize, usize)]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for i in 0..n {
        graph.insert(&node(i));
    }
    for &(imported, importer) in edges {
        graph.add_importer(&node(imported), &node(importer));
    }
    graph
}

fn reachable(graph: &DependencyGraph, start: &PathBuf) -> HashSet<PathBuf> {
    let mut seen = HashSet::from([start.clone()]);
    let mut pending = vec![start.clone()];
    while let Some(path) = pending.pop() {
        for importer in graph.importers_of(&path) {
            if seen.insert(importer.clone()) {
                pending.push(importer);
            }
        }
    }
    seen
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every transitive importer is built exactly once.
    #[test]
    fn property_closure_builds_each_importer_once(
        input in graph(),
        start in 0usize..12,
    ) {
        let (n, edges) = input;
        let graph = build_graph(n, &edges);
        let start = node(start % n);

        let mut built = Vec::new();
        let order = rebuild_closure(&graph, &start, |p| built.push(p.to_path_buf()));

        prop_assert_eq!(&order, &built);
        let unique: HashSet<PathBuf> = order.iter().cloned().collect();
        prop_assert_eq!(unique.len(), order.len(), "duplicate build in {:?}", order);
        prop_assert_eq!(unique, reachable(&graph, &start));
    }

    /// PROPERTY: a file is built only after some file it imports.
    #[test]
    fn property_closure_builds_imported_before_importer(
        input in graph(),
        start in 0usize..12,
    ) {
        let (n, edges) = input;
        let graph = build_graph(n, &edges);
        let start = node(start % n);

        let order = rebuild_closure(&graph, &start, |_| {});

        prop_assert_eq!(order.first(), Some(&start));
        for (i, path) in order.iter().enumerate().skip(1) {
            let has_earlier_import = order[..i]
                .iter()
                .any(|earlier| graph.importers_of(earlier).contains(path));
            prop_assert!(has_earlier_import, "{:?} built before anything it imports", path);
        }
    }
}
