//! Helpers shared by the commands.

use std::future::Future;
use std::path::{Path, PathBuf};

use shakeout_bundler::Analyzer;
use shakeout_bundler::config::TrackedSymbols;

use crate::error::{CliError, Result};
use crate::ui;

/// Discover configuration under `root` and build an analyzer for it.
pub fn load_analyzer(root: &Path) -> Result<Analyzer> {
    let analyzer = Analyzer::discover(root)?;
    tracing::debug!(root = %analyzer.package_root().display(), "package loaded");
    Ok(analyzer)
}

/// Run an analysis behind a spinner. The spinner is cleared on success and
/// marked failed on error.
pub async fn with_spinner<T, F>(message: &str, work: F) -> Result<T>
where
    F: Future<Output = shakeout_bundler::Result<T>>,
{
    let spinner = ui::Spinner::new(message);
    match work.await {
        Ok(value) => {
            spinner.clear();
            Ok(value)
        }
        Err(err) => {
            spinner.fail(message.trim_end_matches("..."));
            Err(err.into())
        }
    }
}

/// Explicit symbols, else every tracked symbol.
pub fn symbols_or_tracked(symbols: Vec<String>, tracked: &TrackedSymbols) -> Result<Vec<String>> {
    let symbols = if symbols.is_empty() {
        tracked.all()
    } else {
        symbols
    };
    if symbols.is_empty() {
        return Err(CliError::NoSymbols);
    }
    Ok(symbols)
}

/// Resolve `path` against `root` unless it is already absolute.
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
