//! Module graph captured from a single build.
//!
//! The graph is an id-keyed node table with adjacency lists. It is assembled
//! once through [`ModuleGraphBuilder`] and read-only afterwards. Every id that
//! appears in an edge list is itself a key of the table; ids the bundler
//! referenced without reporting a module for them (externals, mostly) are
//! inserted as empty placeholder nodes when the graph is built.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::node::ModuleGraphNode;

/// Read-only module graph for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleGraph {
    nodes: IndexMap<String, ModuleGraphNode>,
}

impl ModuleGraph {
    /// Look up a module by id.
    pub fn get(&self, id: &str) -> Option<&ModuleGraphNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over nodes in the order the bundler reported them.
    pub fn nodes(&self) -> impl Iterator<Item = &ModuleGraphNode> {
        self.nodes.values()
    }

    /// Forward edges of `id`, empty for unknown ids.
    pub fn imported_ids(&self, id: &str) -> &[String] {
        self.nodes
            .get(id)
            .map(|node| node.imported_ids.as_slice())
            .unwrap_or(&[])
    }

    /// Reverse edges of `id`, empty for unknown ids.
    pub fn importers(&self, id: &str) -> &[String] {
        self.nodes
            .get(id)
            .map(|node| node.importers.as_slice())
            .unwrap_or(&[])
    }

    /// The first module nothing imports that itself imports something.
    ///
    /// For a build with a single synthesized entry this is that entry.
    pub fn entry_candidate(&self) -> Option<&ModuleGraphNode> {
        self.nodes
            .values()
            .find(|node| node.importers.is_empty() && !node.imported_ids.is_empty())
    }

    /// Modules that contributed code, largest first.
    pub fn contributing_modules(&self) -> Vec<&ModuleGraphNode> {
        let mut modules: Vec<_> = self
            .nodes
            .values()
            .filter(|node| node.rendered_length > 0)
            .collect();
        modules.sort_by(|a, b| b.rendered_length.cmp(&a.rendered_length));
        modules
    }

    /// Sum of rendered lengths over all modules.
    pub fn total_rendered_length(&self) -> u64 {
        self.nodes.values().map(|node| node.rendered_length).sum()
    }
}

/// Incrementally collects modules, edges and rendered sizes.
///
/// Edges and sizes usually arrive from different bundler phases (the
/// resolve hook and the generated chunks), so both can be recorded in any
/// order before [`build`](Self::build) closes the graph.
#[derive(Debug, Default)]
pub struct ModuleGraphBuilder {
    nodes: IndexMap<String, ModuleGraphNode>,
    rendered: FxHashMap<String, u64>,
}

impl ModuleGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a module and its edges. Repeated calls for the same id merge edges.
    pub fn add_module<I, J>(&mut self, id: impl Into<String>, imported_ids: I, importers: J)
    where
        I: IntoIterator,
        I::Item: Into<String>,
        J: IntoIterator,
        J::Item: Into<String>,
    {
        let id = id.into();
        let node = self
            .nodes
            .entry(id.clone())
            .or_insert_with(|| ModuleGraphNode::new(id));

        for imported in imported_ids {
            push_unique(&mut node.imported_ids, imported.into());
        }
        for importer in importers {
            push_unique(&mut node.importers, importer.into());
        }
    }

    /// Attribute rendered bytes to a module.
    pub fn set_rendered_length(&mut self, id: impl Into<String>, length: u64) {
        self.rendered.insert(id.into(), length);
    }

    /// Close the graph over every referenced id and attach rendered sizes.
    pub fn build(self) -> ModuleGraph {
        let ModuleGraphBuilder {
            mut nodes,
            rendered,
        } = self;

        // Modules that only showed up in chunk accounting.
        for id in rendered.keys() {
            if !nodes.contains_key(id) {
                nodes.insert(id.clone(), ModuleGraphNode::new(id.clone()));
            }
        }

        let mut missing_forward: Vec<(String, String)> = Vec::new();
        let mut missing_reverse: Vec<(String, String)> = Vec::new();
        for node in nodes.values() {
            for imported in &node.imported_ids {
                if !nodes.contains_key(imported) {
                    missing_forward.push((imported.clone(), node.id.clone()));
                }
            }
            for importer in &node.importers {
                if !nodes.contains_key(importer) {
                    missing_reverse.push((importer.clone(), node.id.clone()));
                }
            }
        }

        for (id, importer) in missing_forward {
            let node = nodes
                .entry(id.clone())
                .or_insert_with(|| ModuleGraphNode::new(id));
            push_unique(&mut node.importers, importer);
        }
        for (id, imported) in missing_reverse {
            let node = nodes
                .entry(id.clone())
                .or_insert_with(|| ModuleGraphNode::new(id));
            push_unique(&mut node.imported_ids, imported);
        }

        for node in nodes.values_mut() {
            node.rendered_length = rendered.get(&node.id).copied().unwrap_or(0);
        }

        tracing::trace!(modules = nodes.len(), "module graph closed");
        ModuleGraph { nodes }
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn build_inserts_placeholders_for_externals() {
        let mut builder = ModuleGraphBuilder::new();
        builder.add_module("/entry.mjs", ["/lib/index.js"], empty());
        builder.add_module("/lib/index.js", ["react"], ["/entry.mjs"]);
        let graph = builder.build();

        let react = graph.get("react").expect("external placeholder");
        assert_eq!(react.rendered_length, 0);
        assert_eq!(react.importers, vec!["/lib/index.js".to_string()]);

        for node in graph.nodes() {
            for id in node.imported_ids.iter().chain(node.importers.iter()) {
                assert!(graph.contains(id), "{id} referenced but not a node");
            }
        }
    }

    #[test]
    fn modules_without_chunk_accounting_have_zero_length() {
        let mut builder = ModuleGraphBuilder::new();
        builder.add_module("/a.js", ["/b.js"], empty());
        builder.add_module("/b.js", empty(), ["/a.js"]);
        builder.set_rendered_length("/a.js", 10);
        let graph = builder.build();

        assert_eq!(graph.get("/a.js").unwrap().rendered_length, 10);
        assert_eq!(graph.get("/b.js").unwrap().rendered_length, 0);
        assert_eq!(graph.total_rendered_length(), 10);
    }

    #[test]
    fn repeated_edges_are_merged() {
        let mut builder = ModuleGraphBuilder::new();
        builder.add_module("/a.js", ["/b.js"], empty());
        builder.add_module("/a.js", ["/b.js", "/c.js"], empty());
        let graph = builder.build();

        assert_eq!(graph.imported_ids("/a.js"), ["/b.js", "/c.js"]);
    }

    #[test]
    fn entry_candidate_skips_isolated_roots() {
        let mut builder = ModuleGraphBuilder::new();
        builder.add_module("/orphan.js", empty(), empty());
        builder.add_module("/entry.mjs", ["/a.js"], empty());
        builder.add_module("/a.js", empty(), ["/entry.mjs"]);
        let graph = builder.build();

        assert_eq!(graph.entry_candidate().unwrap().id, "/entry.mjs");
    }

    #[test]
    fn contributing_modules_sorted_by_size() {
        let mut builder = ModuleGraphBuilder::new();
        builder.add_module("/small.js", empty(), empty());
        builder.add_module("/big.js", empty(), empty());
        builder.add_module("/gone.js", empty(), empty());
        builder.set_rendered_length("/small.js", 5);
        builder.set_rendered_length("/big.js", 500);
        let graph = builder.build();

        let ids: Vec<_> = graph
            .contributing_modules()
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(ids, vec!["/big.js", "/small.js"]);
    }
}
