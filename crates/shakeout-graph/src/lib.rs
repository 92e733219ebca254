//! # shakeout-graph
//!
//! Pure graph data structures for tree-shaking analysis.
//!
//! A [`ModuleGraph`] is captured from a single bundler run: every module the
//! bundler visited, its forward and reverse import edges, and the number of
//! bytes it contributed to the generated code. On top of it this crate offers
//! the import path search used to explain why a module survived elimination,
//! and the directory-shaped size tree used by bundle visualizations.
//!
//! ```
//! use shakeout_graph::{ModuleGraphBuilder, find_shortest_paths};
//!
//! let mut builder = ModuleGraphBuilder::new();
//! builder.add_module("/entry.mjs", ["/lib/index.js"], Vec::<String>::new());
//! builder.add_module("/lib/index.js", ["/lib/Line.js"], ["/entry.mjs"]);
//! builder.add_module("/lib/Line.js", Vec::<String>::new(), ["/lib/index.js"]);
//! builder.set_rendered_length("/lib/Line.js", 120);
//! let graph = builder.build();
//!
//! let paths = find_shortest_paths(&graph, "/entry.mjs", "/lib/Line.js", 8);
//! assert_eq!(paths.len(), 1);
//! assert_eq!(paths[0].depth(), 2);
//! ```

pub mod graph;
pub mod matching;
pub mod node;
pub mod path_finder;
pub mod size_tree;
pub mod trace;

pub use graph::{ModuleGraph, ModuleGraphBuilder};
pub use matching::{match_targets, matches_target, relative_id};
pub use node::ModuleGraphNode;
pub use path_finder::{DEFAULT_MAX_RESULTS, ImportPath, MAX_IMPORT_DEPTH, find_shortest_paths};
pub use size_tree::SizeTreeNode;
pub use trace::{ContributingModule, TargetOutcome, TraceReport, TracedTarget, trace_target};
