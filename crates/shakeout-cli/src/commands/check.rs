//! Check command implementation.
//!
//! Builds every requested symbol alone and judges which tracked symbols its
//! bundle contains against the expected groups and known issues.

use std::collections::BTreeSet;
use std::path::Path;

use owo_colors::Style;
use shakeout_bundler::{SweepEntry, Verdict};

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the check command.
///
/// # Errors
///
/// Returns `CliError::CheckFailed` when any symbol fails, after printing
/// every result.
pub async fn execute(root: &Path, args: CheckArgs) -> Result<()> {
    let analyzer = utils::load_analyzer(root)?;
    let tracked = &analyzer.config().tracked;

    let symbols = match &args.category {
        Some(category) => tracked
            .category(category)
            .ok_or_else(|| CliError::UnknownCategory(category.clone()))?
            .to_vec(),
        None if args.exports => analyzer.exported_symbols()?.into_iter().collect(),
        None => utils::symbols_or_tracked(args.symbols, tracked)?,
    };
    if symbols.is_empty() {
        return Err(CliError::NoSymbols);
    }

    let candidates = tracked.all();

    let message = format!("Building {} symbols one at a time...", symbols.len());
    let entries = utils::with_spinner(&message, analyzer.sweep(&symbols, &candidates)).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        let width = symbols.iter().map(String::len).max().unwrap_or(0);
        for entry in &entries {
            println!("{}", render_entry(entry, width));
        }
    }

    let failed = entries.iter().filter(|e| !e.verdict.is_success()).count();
    if failed > 0 {
        return Err(CliError::CheckFailed {
            failed,
            total: entries.len(),
        });
    }
    ui::success(&format!("All {} symbols tree-shake as expected", entries.len()));
    Ok(())
}

fn join(names: &BTreeSet<String>) -> String {
    names.iter().cloned().collect::<Vec<_>>().join(", ")
}

fn describe(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Pass => "ok".to_string(),
        Verdict::ExpectedFailure { diff } => {
            format!("known issue, also bundles {}", join(&diff.only_detected))
        }
        Verdict::StaleKnownIssue => {
            "known issue no longer reproduces, remove it from the known issues".to_string()
        }
        Verdict::Mismatch { diff } | Verdict::Regression { diff } => {
            let mut parts = Vec::new();
            if !diff.only_detected.is_empty() {
                parts.push(format!("unexpectedly bundled: {}", join(&diff.only_detected)));
            }
            if !diff.only_expected.is_empty() {
                parts.push(format!("missing: {}", join(&diff.only_expected)));
            }
            parts.join("; ")
        }
    }
}

fn render_entry(entry: &SweepEntry, width: usize) -> String {
    let (mark, style) = match &entry.verdict {
        Verdict::Pass => ("✓", Style::new().green()),
        Verdict::ExpectedFailure { .. } => ("~", Style::new().yellow()),
        _ => ("✗", Style::new().red()),
    };
    format!(
        "{} {:<width$}  {}",
        ui::paint(mark, style),
        entry.symbol,
        describe(&entry.verdict)
    )
}
