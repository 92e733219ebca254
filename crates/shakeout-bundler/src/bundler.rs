//! The bundler port and its Rolldown implementation.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use rolldown::{BundlerBuilder as RolldownBundlerBuilder, BundlerOptions, InputItem, OutputFormat};
use rolldown_common::Output;
use rolldown_plugin::__inner::SharedPluginable;
use shakeout_graph::ModuleGraph;

use crate::artifact::{self, ChunkArtifact, OutputArtifact};
use crate::externals::Externals;
use crate::plugins::{GraphCapture, TreeshakeResolvePlugin};
use crate::{Error, Result};

/// One tree-shaking build.
#[derive(Debug, Clone)]
pub struct BundleRequest {
    /// Synthesized entry file
    pub entry: PathBuf,
    /// Working directory for the build, usually the package root
    pub cwd: PathBuf,
    pub externals: Arc<Externals>,
    /// Record the module graph alongside the output
    pub capture_graph: bool,
}

/// Output of a build, plus the module graph when it was requested.
#[derive(Debug, Clone)]
pub struct BundleOutcome {
    pub artifacts: Vec<OutputArtifact>,
    pub graph: Option<ModuleGraph>,
}

/// Something that turns an entry module into tree-shaken chunks.
#[async_trait]
pub trait ModuleBundler: Send + Sync {
    async fn bundle(&self, request: &BundleRequest) -> Result<BundleOutcome>;
}

/// [`ModuleBundler`] backed by Rolldown, producing a single ESM output.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolldownBundler;

impl RolldownBundler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ModuleBundler for RolldownBundler {
    async fn bundle(&self, request: &BundleRequest) -> Result<BundleOutcome> {
        let entry = request.entry.to_string_lossy().into_owned();
        tracing::debug!(entry = %entry, capture_graph = request.capture_graph, "bundling");

        let options = BundlerOptions {
            input: Some(vec![InputItem {
                name: None,
                import: entry,
            }]),
            cwd: Some(request.cwd.clone()),
            format: Some(OutputFormat::Esm),
            ..Default::default()
        };

        let capture = request.capture_graph.then(|| Arc::new(GraphCapture::new()));
        let mut resolve = TreeshakeResolvePlugin::new(Arc::clone(&request.externals));
        if let Some(capture) = &capture {
            resolve = resolve.with_capture(Arc::clone(capture));
        }
        let plugins: Vec<SharedPluginable> = vec![Arc::new(resolve)];

        let mut bundler = RolldownBundlerBuilder::default()
            .with_options(options)
            .with_plugins(plugins)
            .build()
            .map_err(|e| Error::from_rolldown_batch(&e))?;

        let bundle = bundler
            .generate()
            .await
            .map_err(|e| Error::from_rolldown_batch(&e))?;

        let artifacts: Vec<OutputArtifact> = bundle
            .assets
            .iter()
            .map(|output| match output {
                Output::Chunk(chunk) => {
                    let modules: IndexMap<String, u64> = chunk
                        .modules
                        .keys
                        .iter()
                        .zip(chunk.modules.values.iter())
                        .map(|(id, module)| {
                            let rendered = module.code().map_or(0, |code| code.len() as u64);
                            (id.to_string(), rendered)
                        })
                        .collect();
                    OutputArtifact::Chunk(ChunkArtifact {
                        file_name: chunk.filename.to_string(),
                        code: chunk.code.clone(),
                        modules,
                    })
                }
                Output::Asset(asset) => OutputArtifact::Asset {
                    file_name: asset.filename.to_string(),
                },
            })
            .collect();

        tracing::debug!(
            outputs = artifacts.len(),
            bytes = artifact::tree_shaken_size(&artifacts),
            "bundle generated"
        );

        let graph = capture.map(|capture| capture.finish(artifact::module_sizes(&artifacts)));

        Ok(BundleOutcome { artifacts, graph })
    }
}
