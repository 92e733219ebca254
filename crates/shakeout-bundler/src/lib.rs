//! # shakeout-bundler
//!
//! Tree-shaking analysis of a compiled component library, driven by Rolldown.
//!
//! For any subset of the library's exported symbols this crate answers:
//!
//! - how many bytes survive elimination at each stage (raw compiled folder,
//!   tree-shaken, minified, minified + gzip),
//! - which other tracked symbols end up in the same bundle,
//! - why an unwanted module survives, as the shortest chains of imports
//!   from the build entry to it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use shakeout_bundler::Analyzer;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = Analyzer::discover("./")?;
//! analyzer.ensure_compiled()?;
//!
//! let report = analyzer.report(&["LineChart".to_string()]).await?;
//! for stage in &report.stages {
//!     println!("{:<22} {}", stage.stage, stage.human_readable_size);
//! }
//! # Ok(()) }
//! ```

pub mod analyzer;
pub mod artifact;
pub mod bundler;
pub mod compress;
pub mod detect;
pub mod diagnostics;
pub mod entry;
pub mod exports;
pub mod externals;
pub mod minify;
pub mod oracle;
pub mod plugins;
pub mod size;
pub mod treemap;

pub use analyzer::{Analyzer, SweepEntry};
pub use artifact::{ChunkArtifact, OutputArtifact};
pub use bundler::{BundleOutcome, BundleRequest, ModuleBundler, RolldownBundler};
pub use compress::{Compressor, GzipCompressor};
pub use detect::{detect, find_symbols_in_bundle};
pub use entry::{TempEntry, entry_source};
pub use exports::list_exported_symbols;
pub use externals::{ExternalPattern, Externals, PackageJson, resolve_externals};
pub use minify::{Minifier, OxcMinifier};
pub use oracle::{Oracle, SetDiff, Verdict};
pub use size::{
    BundleSizeReport, BundleSizeStage, BundleStage, directory_size, format_bundle_size,
    reduction_percent,
};
pub use treemap::BundleData;

pub use shakeout_config as config;
pub use shakeout_graph as graph;

use std::path::PathBuf;

/// Error types for shakeout-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The compiled library tree does not exist.
    #[error("compiled library entry not found: {}", .entry.display())]
    MissingCompiledOutput {
        entry: PathBuf,
        build_command: String,
    },

    /// Error from the Rolldown bundler.
    #[error("Rolldown bundler error: {}", format_bundler_error(.0))]
    Bundler(Vec<diagnostics::ExtractedDiagnostic>),

    /// The minifier rejected the code or produced nothing.
    #[error("minification failed: {0}")]
    Minify(String),

    /// Compressing the minified code failed.
    #[error("compression failed: {0}")]
    Compress(#[source] std::io::Error),

    /// Caller supplied input that cannot describe a build.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An external pattern is not a valid regular expression.
    #[error("invalid external pattern '{pattern}': {source}")]
    InvalidExternalPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// package.json could not be read or parsed.
    #[error("failed to read {}: {message}", .path.display())]
    PackageJson { path: PathBuf, message: String },

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] shakeout_config::ConfigError),

    /// A concurrent build task failed to complete.
    #[error("build task failed: {0}")]
    Task(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for shakeout-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a bundler error from a Rolldown error.
    pub fn from_rolldown_batch(error: &dyn std::fmt::Debug) -> Self {
        Error::Bundler(diagnostics::extract_from_rolldown_error(error))
    }
}

fn format_bundler_error(diagnostics: &[diagnostics::ExtractedDiagnostic]) -> String {
    match diagnostics {
        [] => "Unknown bundler error".to_string(),
        [diag] => format!("{}: {}", diag.kind, diag.message),
        many => format!(
            "{} errors: {}",
            many.len(),
            many.iter()
                .map(|d| format!("{}: {}", d.kind, d.message))
                .collect::<Vec<_>>()
                .join("; ")
        ),
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::MissingCompiledOutput { .. } => "MISSING_COMPILED_OUTPUT",
            Error::Bundler(_) => "BUNDLER_ERROR",
            Error::Minify(_) => "MINIFY_ERROR",
            Error::Compress(_) => "COMPRESS_ERROR",
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::InvalidExternalPattern { .. } => "INVALID_EXTERNAL_PATTERN",
            Error::PackageJson { .. } => "PACKAGE_JSON_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Task(_) => "TASK_ERROR",
            Error::Io(_) => "IO_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::MissingCompiledOutput { build_command, .. } => Some(Box::new(format!(
                "Build the compiled output first:\n  {build_command}"
            ))),
            Error::Bundler(diagnostics) => match diagnostics.as_slice() {
                [diag] => diag
                    .help
                    .as_ref()
                    .map(|h| Box::new(h.clone()) as Box<dyn std::fmt::Display>),
                _ => Some(Box::new(
                    "Multiple bundler errors occurred. See details above.".to_string(),
                )),
            },
            Error::Minify(_) => Some(Box::new(
                "The tree-shaken code could not be minified. Run with --verbose to see the build steps.",
            )),
            Error::PackageJson { .. } => Some(Box::new(
                "Run from the package root, or pass the directory holding package.json with --root.",
            )),
            Error::InvalidExternalPattern { .. } => Some(Box::new(
                "External patterns are regular expressions matched against import specifiers.",
            )),
            _ => None,
        }
    }
}
