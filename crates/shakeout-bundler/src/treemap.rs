//! Size treemap documents for bundle visualization.

use std::path::Path;

use serde::Serialize;
use shakeout_graph::{SizeTreeNode, relative_id};

use crate::Result;
use crate::artifact::{self, OutputArtifact};

/// The treemap document written for a set of components.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleData {
    pub components: Vec<String>,
    /// RFC 3339 timestamp
    pub generated_at: String,
    /// Rendered bytes over all modules
    pub total_size: u64,
    pub tree: SizeTreeNode,
}

impl BundleData {
    /// Build the document from one build's output.
    ///
    /// Module ids are made relative to `package_root`, then the
    /// `compiled_dir` prefix is dropped, so `es6/cartesian/Line.js` becomes
    /// `cartesian/Line.js` under a root named `root_name`.
    pub fn from_artifacts(
        root_name: &str,
        components: Vec<String>,
        artifacts: &[OutputArtifact],
        package_root: &Path,
        compiled_dir: &Path,
    ) -> Self {
        let prefix = compiled_dir.to_string_lossy().replace('\\', "/");
        let prefix = prefix.trim_matches('/');

        let modules = artifact::module_sizes(artifacts).map(|(id, size)| {
            let relative = relative_id(id, package_root).replace('\\', "/");
            let stripped = relative
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or(&relative)
                .to_string();
            (stripped, size)
        });

        let tree = SizeTreeNode::from_modules(root_name, modules);
        Self {
            components,
            generated_at: chrono::Utc::now().to_rfc3339(),
            total_size: tree.value,
            tree,
        }
    }

    /// Modules with code, i.e. the leaves of the tree.
    pub fn module_count(&self) -> usize {
        self.tree.count_leaves()
    }

    /// Write the document as pretty JSON, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), modules = self.module_count(), "treemap written");
        Ok(())
    }
}
