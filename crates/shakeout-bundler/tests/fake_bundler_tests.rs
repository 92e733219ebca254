//! Analyzer behavior with in-memory bundler, minifier and compressor.

mod helpers;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use helpers::{create_chart_library, fixture_config, names};
use indexmap::IndexMap;
use parking_lot::Mutex;
use shakeout_bundler::graph::{ModuleGraphBuilder, TargetOutcome, TraceReport};
use shakeout_bundler::{
    Analyzer, BundleOutcome, BundleRequest, BundleStage, ChunkArtifact, Compressor, Error,
    Minifier, ModuleBundler, OutputArtifact, Result, directory_size,
};
use tempfile::TempDir;

/// Emits `function NAME() {}` for every component named in the entry.
#[derive(Default)]
struct FakeBundler {
    entries: Mutex<Vec<PathBuf>>,
    fail: bool,
}

impl FakeBundler {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl ModuleBundler for FakeBundler {
    async fn bundle(&self, request: &BundleRequest) -> Result<BundleOutcome> {
        self.entries.lock().push(request.entry.clone());
        let source = std::fs::read_to_string(&request.entry)?;
        if self.fail {
            return Err(Error::from_rolldown_batch(
                &"MissingExport: \"Nope\" is not exported",
            ));
        }

        let mut code = String::new();
        let mut modules = IndexMap::new();
        for component in ["Line", "Area", "Pie"] {
            if source.contains(&format!(" {component}")) {
                let body = format!("function {component}() {{ return '{component}'; }}\n");
                modules.insert(format!("/lib/{component}.js"), body.len() as u64);
                code.push_str(&body);
            }
        }

        let graph = request.capture_graph.then(|| {
            let entry = request.entry.to_string_lossy().into_owned();
            let mut builder = ModuleGraphBuilder::new();
            builder.add_module(entry.clone(), ["/lib/index.js"], Vec::<String>::new());
            builder.add_module(
                "/lib/index.js",
                modules.keys().cloned().chain(["/lib/Unused.js".to_string()]),
                [entry],
            );
            for (id, size) in &modules {
                builder.set_rendered_length(id.clone(), *size);
            }
            builder.build()
        });

        Ok(BundleOutcome {
            artifacts: vec![OutputArtifact::Chunk(ChunkArtifact {
                file_name: "entry.js".into(),
                code,
                modules,
            })],
            graph,
        })
    }
}

/// Halves the code.
struct HalvingMinifier;

impl Minifier for HalvingMinifier {
    fn minify(&self, code: &str) -> Result<String> {
        Ok(code[..code.len() / 2].to_string())
    }
}

struct BrokenMinifier;

impl Minifier for BrokenMinifier {
    fn minify(&self, _code: &str) -> Result<String> {
        Err(Error::Minify("minifier produced no output".into()))
    }
}

/// Reports a tenth of the input size.
struct TenthCompressor;

impl Compressor for TenthCompressor {
    fn compressed_len(&self, data: &[u8]) -> Result<u64> {
        Ok(data.len() as u64 / 10)
    }
}

fn fake_analyzer(bundler: Arc<FakeBundler>) -> (TempDir, Analyzer) {
    let project = create_chart_library();
    let analyzer = Analyzer::new(project.path(), fixture_config(Vec::new()))
        .unwrap()
        .with_bundler(bundler)
        .with_minifier(Arc::new(HalvingMinifier))
        .with_compressor(Arc::new(TenthCompressor));
    (project, analyzer)
}

#[tokio::test]
async fn report_uses_every_port() {
    let bundler = Arc::new(FakeBundler::default());
    let (_project, analyzer) = fake_analyzer(Arc::clone(&bundler));

    let report = analyzer.report(&names(&["Line", "Area"])).await.unwrap();

    let raw = directory_size(&analyzer.compiled_root()).unwrap();
    let tree_shaken = report.size_of(BundleStage::TreeShaken).unwrap();
    assert_eq!(report.size_of(BundleStage::RawFolder), Some(raw));
    assert_eq!(tree_shaken, 2 * "function Line() { return 'Line'; }\n".len() as u64);
    assert_eq!(report.size_of(BundleStage::Minified), Some(tree_shaken / 2));
    assert_eq!(
        report.size_of(BundleStage::MinifiedCompressed),
        Some(tree_shaken / 2 / 10)
    );
    assert_eq!(report.components, ["Line", "Area"]);
}

#[tokio::test]
async fn entry_file_is_removed_after_success() {
    let bundler = Arc::new(FakeBundler::default());
    let (_project, analyzer) = fake_analyzer(Arc::clone(&bundler));

    analyzer.treeshake(&names(&["Pie"])).await.unwrap();

    let entries = bundler.entries.lock().clone();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].extension().unwrap(), "mjs");
    assert!(!entries[0].exists());
}

#[tokio::test]
async fn entry_file_is_removed_after_bundler_error() {
    let bundler = Arc::new(FakeBundler::failing());
    let (_project, analyzer) = fake_analyzer(Arc::clone(&bundler));

    let err = analyzer.treeshake(&names(&["Nope"])).await.unwrap_err();
    assert!(matches!(err, Error::Bundler(_)));

    let entries = bundler.entries.lock().clone();
    assert!(!entries[0].exists());
}

#[tokio::test]
async fn minifier_failure_aborts_the_report() {
    let (_project, analyzer) = fake_analyzer(Arc::new(FakeBundler::default()));
    let analyzer = analyzer.with_minifier(Arc::new(BrokenMinifier));

    let err = analyzer.report(&names(&["Line"])).await.unwrap_err();
    assert!(matches!(err, Error::Minify(_)));
}

#[tokio::test]
async fn trace_uses_captured_graph() {
    let (_project, analyzer) = fake_analyzer(Arc::new(FakeBundler::default()));

    let report = analyzer.trace(&names(&["Line"]), "line").await.unwrap();
    let TraceReport::Matched { targets } = report else {
        panic!("expected a match");
    };
    assert_eq!(targets.len(), 1);
    let TargetOutcome::Paths { paths } = &targets[0].outcome else {
        panic!("expected paths");
    };
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].depth(), 2);

    let report = analyzer.trace(&names(&["Line"]), "Unused").await.unwrap();
    let TraceReport::Matched { targets } = report else {
        panic!("expected a match");
    };
    assert_eq!(targets[0].outcome, TargetOutcome::Eliminated);
}

#[tokio::test]
async fn sweep_keeps_input_order_under_concurrency() {
    let bundler = Arc::new(FakeBundler::default());
    let (_project, analyzer) = fake_analyzer(Arc::clone(&bundler));

    let symbols = names(&["Pie", "Line", "Area", "Line", "Pie"]);
    let candidates = names(&["Line", "Area", "Pie"]);
    let entries = analyzer.sweep(&symbols, &candidates).await.unwrap();

    let order: Vec<&str> = entries.iter().map(|e| e.symbol.as_str()).collect();
    assert_eq!(order, ["Pie", "Line", "Area", "Line", "Pie"]);
    for entry in &entries {
        assert_eq!(entry.detected.len(), 1);
        assert!(entry.detected.contains(&entry.symbol));
        assert!(entry.verdict.is_success());
    }

    // every build used its own entry file
    let mut used = bundler.entries.lock().clone();
    used.sort();
    used.dedup();
    assert_eq!(used.len(), symbols.len());
}

#[tokio::test]
async fn sweep_propagates_build_errors() {
    let (_project, analyzer) = fake_analyzer(Arc::new(FakeBundler::failing()));
    let err = analyzer
        .sweep(&names(&["Line", "Area"]), &names(&["Line"]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Bundler(_)));
}

#[tokio::test]
async fn trace_returns_the_graph_it_ran_on() {
    let (_project, analyzer) = fake_analyzer(Arc::new(FakeBundler::default()));

    let (report, graph) = analyzer
        .trace_with_graph(&names(&["Area"]), "area")
        .await
        .unwrap();
    assert!(report.has_paths());
    assert_eq!(graph.get("/lib/Area.js").map(|n| n.rendered_length), Some(35));
    assert_eq!(graph.get("/lib/index.js").map(|n| n.rendered_length), Some(0));
}
