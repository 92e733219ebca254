//! Directory-shaped size tree for bundle visualizations.

use serde::{Deserialize, Serialize};

/// A node of the size tree. Directories carry the sum of their children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeTreeNode {
    pub name: String,
    pub value: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SizeTreeNode>>,
}

impl SizeTreeNode {
    /// An empty directory node.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: 0,
            children: Some(Vec::new()),
        }
    }

    fn leaf(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
            children: None,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.children.is_some()
    }

    /// Build a tree named `root_name` from `(relative path, bytes)` pairs.
    ///
    /// Zero-sized entries are skipped. Children are sorted by value, largest
    /// first, at every level.
    pub fn from_modules<I, S>(root_name: impl Into<String>, modules: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut root = Self::directory(root_name);
        for (path, size) in modules {
            if size == 0 {
                continue;
            }
            let segments: Vec<&str> = path
                .as_ref()
                .split('/')
                .filter(|segment| !segment.is_empty())
                .collect();
            if segments.is_empty() {
                continue;
            }
            root.value += size;
            root.insert(&segments, size);
        }
        root.sort_by_value();
        root
    }

    fn insert(&mut self, segments: &[&str], size: u64) {
        let children = self.children.get_or_insert_with(Vec::new);
        match segments {
            [] => {}
            [file] => match children.iter().position(|c| c.name == *file) {
                Some(index) => children[index].value += size,
                None => children.push(Self::leaf(*file, size)),
            },
            [dir, rest @ ..] => {
                let index = match children
                    .iter()
                    .position(|c| c.name == *dir && c.is_directory())
                {
                    Some(index) => index,
                    None => {
                        children.push(Self::directory(*dir));
                        children.len() - 1
                    }
                };
                let child = &mut children[index];
                child.value += size;
                child.insert(rest, size);
            }
        }
    }

    fn sort_by_value(&mut self) {
        if let Some(children) = &mut self.children {
            children.sort_by(|a, b| b.value.cmp(&a.value));
            for child in children.iter_mut() {
                child.sort_by_value();
            }
        }
    }

    /// Number of leaf (file) nodes.
    pub fn count_leaves(&self) -> usize {
        match &self.children {
            None => 1,
            Some(children) if children.is_empty() => 1,
            Some(children) => children.iter().map(Self::count_leaves).sum(),
        }
    }
}
