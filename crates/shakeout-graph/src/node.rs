//! A single module as seen by one bundler run.

use serde::{Deserialize, Serialize};

/// One module of a captured build.
///
/// `rendered_length` is the number of bytes this module contributed to the
/// generated chunks. A module that was visited but fully eliminated keeps an
/// entry with `rendered_length == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleGraphNode {
    /// Resolved module id (absolute path for on-disk modules, bare name for externals)
    pub id: String,
    /// Ids this module statically imports, in bundler enumeration order
    pub imported_ids: Vec<String>,
    /// Ids of modules that statically import this one
    pub importers: Vec<String>,
    /// Bytes contributed to the generated code
    pub rendered_length: u64,
}

impl ModuleGraphNode {
    /// Create a node with no edges and no rendered code.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            imported_ids: Vec::new(),
            importers: Vec::new(),
            rendered_length: 0,
        }
    }

    /// True when the module contributed no code to the output.
    pub fn is_eliminated(&self) -> bool {
        self.rendered_length == 0
    }

    /// True when nothing imports this module.
    pub fn is_root(&self) -> bool {
        self.importers.is_empty()
    }
}
