//! Shortest import path search.
//!
//! Explains why a module survived tree-shaking by listing the shortest chains
//! of static imports that lead from the build entry to it.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::graph::ModuleGraph;
use crate::matching::relative_id;

/// Maximum number of modules in a single path.
///
/// Branches that reach this length are not extended further.
pub const MAX_IMPORT_DEPTH: usize = 25;

/// Number of paths reported per target when the caller has no preference.
pub const DEFAULT_MAX_RESULTS: usize = 8;

/// One chain of static imports from the entry to a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPath {
    /// Module ids from entry (first) to target (last)
    pub modules: Vec<String>,
}

impl ImportPath {
    pub fn new(modules: Vec<String>) -> Self {
        Self { modules }
    }

    /// Number of import hops (path length - 1).
    pub fn depth(&self) -> usize {
        self.modules.len().saturating_sub(1)
    }

    pub fn entry(&self) -> Option<&str> {
        self.modules.first().map(String::as_str)
    }

    pub fn target(&self) -> Option<&str> {
        self.modules.last().map(String::as_str)
    }

    /// True if some module appears twice.
    pub fn has_repeated_module(&self) -> bool {
        let mut seen = FxHashSet::default();
        self.modules.iter().any(|id| !seen.insert(id))
    }

    /// Format as `a.js -> b.js -> c.js` with ids relative to `root`.
    pub fn format_chain(&self, root: &std::path::Path) -> String {
        self.modules
            .iter()
            .map(|id| relative_id(id, root))
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// Find up to `max_results` shortest import paths from `entry` to `target`.
///
/// Breadth-first over forward edges. A module already on the current partial
/// path is never appended again, so cycles are legal in the graph but never
/// appear in a result. Modules that cannot reach `target` at all are pruned
/// up front; this does not change which paths are found.
///
/// Equally short paths are returned in queue order, which follows each
/// module's `imported_ids` order. That order carries no meaning.
pub fn find_shortest_paths(
    graph: &ModuleGraph,
    entry: &str,
    target: &str,
    max_results: usize,
) -> Vec<ImportPath> {
    let mut results = Vec::new();
    if max_results == 0 || !graph.contains(entry) || !graph.contains(target) {
        return results;
    }

    let reaches_target = modules_reaching(graph, target);
    if !reaches_target.contains(entry) {
        return results;
    }

    let mut queue: VecDeque<Vec<&str>> = VecDeque::new();
    queue.push_back(vec![entry]);

    while let Some(current_path) = queue.pop_front() {
        let Some(&current) = current_path.last() else {
            continue;
        };

        if current == target {
            results.push(ImportPath::new(
                current_path.iter().map(|id| id.to_string()).collect(),
            ));
            if results.len() >= max_results {
                break;
            }
            continue;
        }

        if current_path.len() >= MAX_IMPORT_DEPTH {
            continue;
        }

        for next in graph.imported_ids(current) {
            let next = next.as_str();
            if !reaches_target.contains(next) || current_path.contains(&next) {
                continue;
            }
            let mut new_path = current_path.clone();
            new_path.push(next);
            queue.push_back(new_path);
        }
    }

    tracing::debug!(
        entry,
        target,
        found = results.len(),
        "import path search finished"
    );
    results
}

/// Every module from which `target` is reachable over forward edges, `target` included.
fn modules_reaching<'a>(graph: &'a ModuleGraph, target: &'a str) -> FxHashSet<&'a str> {
    // Reverse adjacency derived from forward edges only, so the pruning stays
    // consistent with the edges the search walks.
    let mut reverse: rustc_hash::FxHashMap<&str, Vec<&str>> = rustc_hash::FxHashMap::default();
    for node in graph.nodes() {
        for imported in &node.imported_ids {
            reverse
                .entry(imported.as_str())
                .or_default()
                .push(node.id.as_str());
        }
    }

    let mut seen = FxHashSet::default();
    let mut queue = VecDeque::from([target]);
    seen.insert(target);
    while let Some(id) = queue.pop_front() {
        if let Some(importers) = reverse.get(id) {
            for &importer in importers {
                if seen.insert(importer) {
                    queue.push_back(importer);
                }
            }
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ModuleGraphBuilder;

    fn graph_from(edges: &[(&str, &[&str])]) -> ModuleGraph {
        let mut builder = ModuleGraphBuilder::new();
        for (id, imports) in edges {
            builder.add_module(*id, imports.iter().copied(), Vec::<String>::new());
        }
        builder.build()
    }

    #[test]
    fn finds_single_chain() {
        let graph = graph_from(&[("entry", &["a"]), ("a", &["target"]), ("target", &[])]);
        let paths = find_shortest_paths(&graph, "entry", "target", DEFAULT_MAX_RESULTS);

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].modules, vec!["entry", "a", "target"]);
        assert_eq!(paths[0].depth(), 2);
        assert_eq!(paths[0].entry(), Some("entry"));
        assert_eq!(paths[0].target(), Some("target"));
    }

    #[test]
    fn shortest_paths_come_first() {
        // entry -> target directly, and entry -> a -> target
        let graph = graph_from(&[
            ("entry", &["a", "target"]),
            ("a", &["target"]),
            ("target", &[]),
        ]);
        let paths = find_shortest_paths(&graph, "entry", "target", DEFAULT_MAX_RESULTS);

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].modules, vec!["entry", "target"]);
        assert_eq!(paths[1].modules, vec!["entry", "a", "target"]);
    }

    #[test]
    fn cycles_never_repeat_modules() {
        let graph = graph_from(&[
            ("entry", &["a"]),
            ("a", &["b"]),
            ("b", &["a", "target"]),
            ("target", &["entry"]),
        ]);
        let paths = find_shortest_paths(&graph, "entry", "target", DEFAULT_MAX_RESULTS);

        assert_eq!(paths.len(), 1);
        for path in &paths {
            assert!(!path.has_repeated_module(), "{:?}", path.modules);
        }
    }

    #[test]
    fn respects_max_results() {
        let graph = graph_from(&[
            ("entry", &["a", "b", "c"]),
            ("a", &["target"]),
            ("b", &["target"]),
            ("c", &["target"]),
            ("target", &[]),
        ]);
        let paths = find_shortest_paths(&graph, "entry", "target", 2);

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].modules, vec!["entry", "a", "target"]);
        assert_eq!(paths[1].modules, vec!["entry", "b", "target"]);
    }

    #[test]
    fn unreachable_target_yields_nothing() {
        let graph = graph_from(&[("entry", &["a"]), ("a", &[]), ("island", &["target"])]);
        assert!(find_shortest_paths(&graph, "entry", "target", DEFAULT_MAX_RESULTS).is_empty());
    }

    #[test]
    fn unknown_ids_yield_nothing() {
        let graph = graph_from(&[("entry", &[])]);
        assert!(find_shortest_paths(&graph, "entry", "missing", DEFAULT_MAX_RESULTS).is_empty());
        assert!(find_shortest_paths(&graph, "missing", "entry", DEFAULT_MAX_RESULTS).is_empty());
    }

    #[test]
    fn entry_equal_to_target_is_a_zero_depth_path() {
        let graph = graph_from(&[("entry", &["a"]), ("a", &[])]);
        let paths = find_shortest_paths(&graph, "entry", "entry", DEFAULT_MAX_RESULTS);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].depth(), 0);
    }

    #[test]
    fn chains_longer_than_max_depth_are_not_followed() {
        let ids: Vec<String> = (0..=MAX_IMPORT_DEPTH).map(|i| format!("m{i}")).collect();
        let mut builder = ModuleGraphBuilder::new();
        for pair in ids.windows(2) {
            builder.add_module(pair[0].clone(), [pair[1].clone()], Vec::<String>::new());
        }
        let graph = builder.build();

        // m0 .. m{MAX} is MAX + 1 modules long
        let last = ids.last().unwrap();
        assert!(find_shortest_paths(&graph, "m0", last, DEFAULT_MAX_RESULTS).is_empty());

        let within = &ids[MAX_IMPORT_DEPTH - 1];
        let paths = find_shortest_paths(&graph, "m0", within, DEFAULT_MAX_RESULTS);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].modules.len(), MAX_IMPORT_DEPTH);
    }

    #[test]
    fn format_chain_strips_root() {
        let path = ImportPath::new(vec!["/pkg/es6/index.js".into(), "/pkg/es6/Line.js".into()]);
        assert_eq!(
            path.format_chain(std::path::Path::new("/pkg")),
            "es6/index.js -> es6/Line.js"
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_edges() -> impl Strategy<Value = Vec<(usize, usize)>> {
            prop::collection::vec((0usize..12, 0usize..12), 0..48)
        }

        proptest! {
            #[test]
            fn results_are_valid_simple_paths(edges in arb_edges(), target in 0usize..12) {
                let mut builder = ModuleGraphBuilder::new();
                builder.add_module("n0", Vec::<String>::new(), Vec::<String>::new());
                for (from, to) in &edges {
                    builder.add_module(format!("n{from}"), [format!("n{to}")], Vec::<String>::new());
                }
                let graph = builder.build();
                let target = format!("n{target}");

                let paths = find_shortest_paths(&graph, "n0", &target, DEFAULT_MAX_RESULTS);
                prop_assert!(paths.len() <= DEFAULT_MAX_RESULTS);

                let mut previous_depth = 0;
                for path in &paths {
                    prop_assert!(!path.has_repeated_module());
                    prop_assert_eq!(path.entry(), Some("n0"));
                    prop_assert_eq!(path.target(), Some(target.as_str()));
                    prop_assert!(path.depth() >= previous_depth);
                    previous_depth = path.depth();
                    for hop in path.modules.windows(2) {
                        prop_assert!(graph.imported_ids(&hop[0]).contains(&hop[1]));
                    }
                }
            }
        }
    }
}
