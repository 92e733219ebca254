//! High-level analysis entry point.
//!
//! An [`Analyzer`] is bound to one package root. It owns the resolved
//! externals, the curated expectations and the three tooling ports
//! (bundler, minifier, compressor), and runs every build through a fresh
//! synthesized entry.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;
use serde::Serialize;
use shakeout_config::{ConfigDiscovery, ShakeoutConfig};
use shakeout_graph::{ModuleGraph, ModuleGraphBuilder, TraceReport, trace_target};

use crate::artifact::{self, OutputArtifact};
use crate::bundler::{BundleOutcome, BundleRequest, ModuleBundler, RolldownBundler};
use crate::compress::{Compressor, GzipCompressor};
use crate::detect::find_symbols_in_bundle;
use crate::entry::TempEntry;
use crate::exports::list_exported_symbols;
use crate::externals::{Externals, PackageJson};
use crate::minify::{Minifier, OxcMinifier};
use crate::oracle::{Oracle, Verdict};
use crate::size::{BundleSizeReport, directory_size};
use crate::treemap::BundleData;
use crate::{Error, Result};

/// Result of building one symbol alone during a sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepEntry {
    pub symbol: String,
    pub detected: BTreeSet<String>,
    pub verdict: Verdict,
}

/// Tree-shaking analysis of one compiled library.
#[derive(Clone)]
pub struct Analyzer {
    package_root: PathBuf,
    package_name: Option<String>,
    config: Arc<ShakeoutConfig>,
    externals: Arc<Externals>,
    oracle: Arc<Oracle>,
    bundler: Arc<dyn ModuleBundler>,
    minifier: Arc<dyn Minifier>,
    compressor: Arc<dyn Compressor>,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("package_root", &self.package_root)
            .field("package_name", &self.package_name)
            .field("externals", &self.externals.len())
            .finish_non_exhaustive()
    }
}

impl Analyzer {
    /// Load configuration from `package_root` (or the built-ins) and
    /// resolve externals from its `package.json`.
    pub fn discover(package_root: impl AsRef<Path>) -> Result<Self> {
        let config = ConfigDiscovery::new(package_root.as_ref()).load_or_default()?;
        Self::new(package_root, config)
    }

    /// Create an analyzer with the Rolldown, oxc and gzip implementations.
    pub fn new(package_root: impl AsRef<Path>, config: ShakeoutConfig) -> Result<Self> {
        let package_root = package_root.as_ref();
        let package_root = if package_root.is_absolute() {
            package_root.to_path_buf().clean()
        } else {
            std::env::current_dir()?.join(package_root).clean()
        };

        // neither manifest nor compiled output: report the missing build
        let manifest_path = package_root.join("package.json");
        let entry = config.library.entry_path(&package_root);
        if !manifest_path.is_file() && !entry.is_file() {
            return Err(Error::MissingCompiledOutput {
                entry,
                build_command: config.library.build_command.clone(),
            });
        }

        let manifest = PackageJson::read(&manifest_path)?;
        let externals = Externals::from_manifest(&manifest, &config.externals)?;
        let oracle = Oracle::from_config(&config);

        Ok(Self {
            package_root,
            package_name: manifest.name,
            config: Arc::new(config),
            externals: Arc::new(externals),
            oracle: Arc::new(oracle),
            bundler: Arc::new(RolldownBundler::new()),
            minifier: Arc::new(OxcMinifier::new()),
            compressor: Arc::new(GzipCompressor::new()),
        })
    }

    pub fn with_bundler(mut self, bundler: Arc<dyn ModuleBundler>) -> Self {
        self.bundler = bundler;
        self
    }

    pub fn with_minifier(mut self, minifier: Arc<dyn Minifier>) -> Self {
        self.minifier = minifier;
        self
    }

    pub fn with_compressor(mut self, compressor: Arc<dyn Compressor>) -> Self {
        self.compressor = compressor;
        self
    }

    pub fn package_root(&self) -> &Path {
        &self.package_root
    }

    /// Name used for the root of size trees: the package name, else the
    /// directory name.
    pub fn display_name(&self) -> String {
        self.package_name.clone().unwrap_or_else(|| {
            self.package_root
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "package".to_string())
        })
    }

    pub fn config(&self) -> &ShakeoutConfig {
        &self.config
    }

    pub fn oracle(&self) -> &Oracle {
        &self.oracle
    }

    pub fn compiled_root(&self) -> PathBuf {
        self.config.library.compiled_root(&self.package_root)
    }

    pub fn entry_path(&self) -> PathBuf {
        self.config.library.entry_path(&self.package_root)
    }

    /// Fail with remediation text when the compiled entry does not exist.
    pub fn ensure_compiled(&self) -> Result<()> {
        let entry = self.entry_path();
        if entry.is_file() {
            Ok(())
        } else {
            Err(Error::MissingCompiledOutput {
                entry,
                build_command: self.config.library.build_command.clone(),
            })
        }
    }

    async fn build(&self, symbols: &[String], capture_graph: bool) -> Result<(BundleOutcome, String)> {
        let entry = TempEntry::create(&self.entry_path(), symbols)?;
        let entry_id = entry.path().to_path_buf().clean().to_string_lossy().into_owned();

        let request = BundleRequest {
            entry: entry.path().to_path_buf(),
            cwd: self.package_root.clone(),
            externals: Arc::clone(&self.externals),
            capture_graph,
        };
        let outcome = self.bundler.bundle(&request).await?;
        drop(entry);

        Ok((outcome, entry_id))
    }

    /// Bundle `symbols` with tree-shaking and return the output.
    pub async fn treeshake(&self, symbols: &[String]) -> Result<Vec<OutputArtifact>> {
        let (outcome, _) = self.build(symbols, false).await?;
        Ok(outcome.artifacts)
    }

    /// Bundle `symbols` and capture the module graph of the same build.
    ///
    /// Returns the output, the graph and the id of the synthesized entry
    /// within the graph.
    pub async fn treeshake_with_graph(
        &self,
        symbols: &[String],
    ) -> Result<(Vec<OutputArtifact>, ModuleGraph, String)> {
        let (outcome, entry_id) = self.build(symbols, true).await?;
        let graph = match outcome.graph {
            Some(graph) => graph,
            None => {
                let mut builder = ModuleGraphBuilder::new();
                for (id, size) in artifact::module_sizes(&outcome.artifacts) {
                    builder.set_rendered_length(id, size);
                }
                builder.build()
            }
        };
        Ok((outcome.artifacts, graph, entry_id))
    }

    /// Sizes of the bundle for `symbols` at every optimization stage.
    pub async fn report(&self, symbols: &[String]) -> Result<BundleSizeReport> {
        self.ensure_compiled()?;
        tracing::info!(symbols = ?symbols, "measuring bundle");

        let raw = directory_size(&self.compiled_root())?;
        let artifacts = self.treeshake(symbols).await?;
        let tree_shaken = artifact::tree_shaken_size(&artifacts);

        let code = artifact::concatenated_code(&artifacts);
        let minified = self.minifier.minify(&code)?;
        let compressed = self.compressor.compressed_len(minified.as_bytes())?;
        tracing::debug!(raw, tree_shaken, minified = minified.len(), compressed, "stage sizes");

        let report = BundleSizeReport::from_sizes(
            symbols.to_vec(),
            raw,
            tree_shaken,
            minified.len() as u64,
            compressed,
        );
        for violation in report.validate() {
            tracing::warn!(%violation, "unexpected stage ordering");
        }
        Ok(report)
    }

    /// Explain why modules matching `target` end up in the bundle of `from`.
    pub async fn trace(&self, from: &[String], target: &str) -> Result<TraceReport> {
        let (report, _) = self.trace_with_graph(from, target).await?;
        Ok(report)
    }

    /// Like [`Analyzer::trace`], also returning the graph the trace ran on
    /// so callers can look up per-module sizes along each path.
    pub async fn trace_with_graph(
        &self,
        from: &[String],
        target: &str,
    ) -> Result<(TraceReport, ModuleGraph)> {
        self.ensure_compiled()?;
        tracing::info!(from = ?from, target, "tracing");

        let (_, graph, entry_id) = self.treeshake_with_graph(from).await?;
        let report = trace_target(
            &graph,
            &entry_id,
            target,
            &self.package_root,
            self.config.analysis.max_paths,
        );
        Ok((report, graph))
    }

    /// Which of `candidates` appear in the bundle of `symbol` alone.
    pub async fn detect_in_isolation<S: AsRef<str>>(
        &self,
        symbol: &str,
        candidates: &[S],
    ) -> Result<BTreeSet<String>> {
        let artifacts = self.treeshake(&[symbol.to_string()]).await?;
        Ok(find_symbols_in_bundle(&artifacts, candidates))
    }

    /// Build every symbol alone and judge what else it pulls in.
    ///
    /// Each build looks for `candidates` plus every name the oracle judges
    /// that symbol by (itself, its expected group and its known issue).
    /// Builds run concurrently up to `analysis.maxParallelBuilds` (default:
    /// CPU count capped at 8). Results are in input order; the first failed
    /// build in that order is returned as the error.
    pub async fn sweep(&self, symbols: &[String], candidates: &[String]) -> Result<Vec<SweepEntry>> {
        use tokio::sync::Semaphore;
        use tokio::task::JoinSet;

        self.ensure_compiled()?;
        let max_parallel = self
            .config
            .analysis
            .max_parallel_builds
            .unwrap_or_else(|| num_cpus::get().min(8));
        tracing::info!(symbols = symbols.len(), max_parallel, "sweep started");

        let semaphore = Arc::new(Semaphore::new(max_parallel));
        let candidates: Arc<[String]> = candidates.into();
        let mut join_set = JoinSet::new();

        for (index, symbol) in symbols.iter().enumerate() {
            let analyzer = self.clone();
            let symbol = symbol.clone();
            let candidates = Arc::clone(&candidates);
            let permit = Arc::clone(&semaphore);

            join_set.spawn(async move {
                let result: Result<SweepEntry> = async {
                    let _permit = permit
                        .acquire()
                        .await
                        .map_err(|e| Error::Task(e.to_string()))?;
                    let mut wanted: BTreeSet<String> = candidates.iter().cloned().collect();
                    wanted.extend(analyzer.oracle.names_for(&symbol));
                    let wanted: Vec<String> = wanted.into_iter().collect();
                    let detected = analyzer.detect_in_isolation(&symbol, &wanted[..]).await?;
                    let verdict = analyzer.oracle.check(&symbol, &detected);
                    tracing::debug!(symbol = %symbol, ?verdict, "swept");
                    Ok(SweepEntry {
                        symbol,
                        detected,
                        verdict,
                    })
                }
                .await;
                (index, result)
            });
        }

        let mut slots: Vec<Option<Result<SweepEntry>>> = (0..symbols.len()).map(|_| None).collect();
        while let Some(joined) = join_set.join_next().await {
            let (index, result) = joined.map_err(|e| Error::Task(e.to_string()))?;
            slots[index] = Some(result);
        }

        slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| Err(Error::Task("build did not report".into()))))
            .collect()
    }

    /// Size treemap of the bundle for `symbols`.
    pub async fn treemap(&self, symbols: &[String]) -> Result<BundleData> {
        self.ensure_compiled()?;
        let artifacts = self.treeshake(symbols).await?;
        Ok(BundleData::from_artifacts(
            &self.display_name(),
            symbols.to_vec(),
            &artifacts,
            &self.package_root,
            &self.config.library.compiled_dir,
        ))
    }

    /// Every name importable from the compiled entry.
    pub fn exported_symbols(&self) -> Result<BTreeSet<String>> {
        self.ensure_compiled()?;
        list_exported_symbols(&self.entry_path())
    }
}
