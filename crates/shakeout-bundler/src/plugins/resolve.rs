//! Import resolution for tree-shaking builds.
//!
//! Compiled component libraries import directories (`./shape`) and expect
//! the platform to pick `index.js`, and may omit the `.js` extension. Every
//! module this plugin resolves is flagged side-effect free so that unused
//! imports are dropped whole; externals are handed back to Rolldown as
//! external without being loaded.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;
use rolldown_common::side_effects::HookSideEffects;
use rolldown_common::{ImportKind, ResolvedExternal};
use rolldown_plugin::{
    HookResolveIdArgs, HookResolveIdOutput, HookResolveIdReturn, HookUsage, Plugin, PluginContext,
};

use crate::externals::Externals;
use crate::plugins::GraphCapture;

/// Resolves relative and absolute imports and marks externals.
#[derive(Debug, Clone)]
pub struct TreeshakeResolvePlugin {
    externals: Arc<Externals>,
    capture: Option<Arc<GraphCapture>>,
}

impl TreeshakeResolvePlugin {
    pub fn new(externals: Arc<Externals>) -> Self {
        Self {
            externals,
            capture: None,
        }
    }

    /// Report every resolved static edge to `capture`.
    pub fn with_capture(mut self, capture: Arc<GraphCapture>) -> Self {
        self.capture = Some(capture);
        self
    }

    fn record(&self, importer: Option<&str>, id: &str, kind: ImportKind) {
        let Some(capture) = &self.capture else {
            return;
        };
        match importer {
            None => capture.record_module(id),
            // Dynamic imports are not part of the static graph.
            Some(_) if matches!(kind, ImportKind::DynamicImport) => capture.record_module(id),
            Some(importer) => capture.record_edge(importer, id),
        }
    }
}

/// Locate the file a relative or absolute specifier refers to.
///
/// Order: a directory with an `index.js`, the path itself, then the path
/// with `.js` appended.
pub fn resolve_file(specifier: &str, importer: Option<&str>) -> Option<PathBuf> {
    let candidate = Path::new(specifier);
    let joined = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else if specifier.starts_with('.') {
        let dir = importer
            .and_then(|importer| Path::new(importer).parent())
            .map(Path::to_path_buf)
            .or_else(|| std::env::current_dir().ok())?;
        dir.join(candidate)
    } else {
        return None;
    };
    let base = joined.clean();

    let index = base.join("index.js");
    if base.is_dir() && index.is_file() {
        return Some(index);
    }
    if base.is_file() {
        return Some(base);
    }
    let mut with_ext = base.into_os_string();
    with_ext.push(".js");
    let with_ext = PathBuf::from(with_ext);
    with_ext.is_file().then_some(with_ext)
}

impl Plugin for TreeshakeResolvePlugin {
    fn name(&self) -> Cow<'static, str> {
        "shakeout-treeshake-resolve".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::ResolveId
    }

    fn resolve_id(
        &self,
        _ctx: &PluginContext,
        args: &HookResolveIdArgs,
    ) -> impl std::future::Future<Output = HookResolveIdReturn> + Send {
        let specifier = args.specifier;
        let importer = args.importer;

        let output = if self.externals.is_external(specifier) {
            self.record(importer, specifier, args.kind);
            Some(HookResolveIdOutput {
                id: specifier.into(),
                external: Some(ResolvedExternal::Bool(true)),
                ..Default::default()
            })
        } else if let Some(path) = resolve_file(specifier, importer) {
            let id = path.to_string_lossy().into_owned();
            self.record(importer, &id, args.kind);
            Some(HookResolveIdOutput {
                id: id.into(),
                external: Some(ResolvedExternal::Bool(false)),
                side_effects: Some(HookSideEffects::False),
                ..Default::default()
            })
        } else {
            tracing::trace!(specifier, importer, "left to the default resolver");
            None
        };

        async move { Ok(output) }
    }
}
