//! Fuzzy matching of module ids against a user-supplied pattern.

use std::borrow::Cow;
use std::path::Path;

use path_clean::PathClean;

use crate::graph::ModuleGraph;
use crate::node::ModuleGraphNode;

/// Strip `root` (and the following separator) from `id` when it is a prefix.
///
/// Ids outside `root`, such as externals, are returned unchanged.
pub fn relative_id<'a>(id: &'a str, root: &Path) -> Cow<'a, str> {
    let root = root.to_path_buf().clean();
    let root = root.to_string_lossy();
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        return Cow::Borrowed(id);
    }

    match id.strip_prefix(root) {
        Some(rest) if rest.starts_with('/') => Cow::Borrowed(&id[root.len() + 1..]),
        _ => Cow::Borrowed(id),
    }
}

/// Whether a module id matches a target pattern.
///
/// Matches when the root-relative id contains the pattern case-insensitively,
/// or when the file name without its `.js` extension equals the pattern
/// case-insensitively.
pub fn matches_target(id: &str, pattern: &str, root: &Path) -> bool {
    let pattern = pattern.to_lowercase();
    if pattern.is_empty() {
        return false;
    }

    if relative_id(id, root).to_lowercase().contains(&pattern) {
        return true;
    }

    Path::new(id)
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.strip_suffix(".js").unwrap_or(name))
        .is_some_and(|stem| stem.to_lowercase() == pattern)
}

/// All nodes of `graph` whose id matches `pattern`, in graph order.
pub fn match_targets<'g>(
    graph: &'g ModuleGraph,
    pattern: &str,
    root: &Path,
) -> Vec<&'g ModuleGraphNode> {
    graph
        .nodes()
        .filter(|node| matches_target(&node.id, pattern, root))
        .collect()
}
