//! Explain why modules matching a pattern are part of a build.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::graph::ModuleGraph;
use crate::matching::{match_targets, relative_id};
use crate::path_finder::{ImportPath, find_shortest_paths};

/// What the search found for one matched module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetOutcome {
    /// Imported somewhere in the graph but contributes no code.
    Eliminated,
    /// Shortest import chains from the entry.
    Paths { paths: Vec<ImportPath> },
    /// Contributes code but no static import chain reaches it.
    Unreachable,
}

/// A matched module and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracedTarget {
    pub id: String,
    pub rendered_length: u64,
    pub outcome: TargetOutcome,
}

/// A module that contributes code, reported when nothing matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributingModule {
    pub id: String,
    pub rendered_length: u64,
}

/// Result of tracing a pattern through a build graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceReport {
    Matched { targets: Vec<TracedTarget> },
    /// No module matched. Not an error: the pattern may simply have been
    /// eliminated, so every module that does contribute code is listed.
    NoMatch { contributing: Vec<ContributingModule> },
}

impl TraceReport {
    /// True when at least one matched target has an import path.
    pub fn has_paths(&self) -> bool {
        match self {
            TraceReport::Matched { targets } => targets
                .iter()
                .any(|t| matches!(t.outcome, TargetOutcome::Paths { .. })),
            TraceReport::NoMatch { .. } => false,
        }
    }
}

/// Match `pattern` against the graph and search import paths from `entry`
/// to every match.
pub fn trace_target(
    graph: &ModuleGraph,
    entry: &str,
    pattern: &str,
    root: &Path,
    max_results: usize,
) -> TraceReport {
    let matches = match_targets(graph, pattern, root);
    if matches.is_empty() {
        let contributing = graph
            .contributing_modules()
            .into_iter()
            .map(|node| ContributingModule {
                id: node.id.clone(),
                rendered_length: node.rendered_length,
            })
            .collect();
        return TraceReport::NoMatch { contributing };
    }

    let targets = matches
        .into_iter()
        .map(|node| {
            let outcome = if node.is_eliminated() {
                TargetOutcome::Eliminated
            } else {
                let paths = find_shortest_paths(graph, entry, &node.id, max_results);
                if paths.is_empty() {
                    TargetOutcome::Unreachable
                } else {
                    TargetOutcome::Paths { paths }
                }
            };
            tracing::debug!(module = %relative_id(&node.id, root), ?outcome, "traced");
            TracedTarget {
                id: node.id.clone(),
                rendered_length: node.rendered_length,
                outcome,
            }
        })
        .collect();

    TraceReport::Matched { targets }
}
