//! Presence detection of named declarations in bundled code.
//!
//! This is a textual heuristic. A declaration-shaped match inside a comment
//! or string also counts.

use std::collections::BTreeSet;

use regex::Regex;

use crate::artifact::{self, OutputArtifact};

fn declaration_pattern(name: &str) -> Option<Regex> {
    let name = regex::escape(name);
    // `\b` does not treat `$` as a word character, so boundaries are spelled out.
    let pattern = format!(
        r"(?:^|[^\w$])(?:(?:var|let|const)\s+{name}(?:\s|=|;|,)|function\s*\*?\s*{name}\s*\(|class\s+{name}(?:\s|\{{|extends))"
    );
    Regex::new(&pattern).ok()
}

/// Which of `candidates` are declared somewhere in `code`.
pub fn detect<S: AsRef<str>>(code: &str, candidates: &[S]) -> BTreeSet<String> {
    candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !name.is_empty())
        .filter(|name| declaration_pattern(name).is_some_and(|re| re.is_match(code)))
        .map(str::to_string)
        .collect()
}

/// [`detect`] over the concatenated chunk code of a build.
pub fn find_symbols_in_bundle<S: AsRef<str>>(
    artifacts: &[OutputArtifact],
    candidates: &[S],
) -> BTreeSet<String> {
    detect(&artifact::concatenated_code(artifacts), candidates)
}
