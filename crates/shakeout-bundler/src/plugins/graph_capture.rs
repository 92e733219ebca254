//! Module graph capture during a build.
//!
//! The resolve plugin reports every static edge it settles while Rolldown
//! scans the module tree. Once the chunks are generated the recorded edges
//! are combined with the per-module rendered sizes into a [`ModuleGraph`].

use parking_lot::Mutex;
use shakeout_graph::{ModuleGraph, ModuleGraphBuilder};

/// Shared recorder for the edges of one build.
#[derive(Debug, Default)]
pub struct GraphCapture {
    builder: Mutex<ModuleGraphBuilder>,
}

impl GraphCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a module with no known edges yet, such as the entry.
    pub fn record_module(&self, id: &str) {
        self.builder
            .lock()
            .add_module(id, std::iter::empty::<String>(), std::iter::empty::<String>());
    }

    /// Record a static import of `imported` by `importer`.
    pub fn record_edge(&self, importer: &str, imported: &str) {
        tracing::trace!(importer, imported, "edge");
        let mut builder = self.builder.lock();
        builder.add_module(importer, [imported], std::iter::empty::<String>());
        builder.add_module(imported, std::iter::empty::<String>(), [importer]);
    }

    /// Close the graph with the rendered size of every emitted module.
    ///
    /// Modules that were resolved but emitted nothing keep a size of zero.
    pub fn finish<'a, I>(&self, rendered: I) -> ModuleGraph
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        let mut builder = std::mem::take(&mut *self.builder.lock());
        for (id, length) in rendered {
            builder.set_rendered_length(id, length);
        }
        builder.build()
    }
}
