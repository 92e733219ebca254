//! Trace command implementation.

use std::fmt::Write as _;
use std::path::Path;

use owo_colors::Style;
use shakeout_bundler::graph::{
    ImportPath, ModuleGraph, TargetOutcome, TraceReport, TracedTarget, relative_id,
};

use crate::cli::TraceArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

const SEPARATOR: &str = "──────────────────────────────────────────────────────";

/// Execute the trace command.
///
/// Bundles the `--from` symbols, matches `--to` against every module in the
/// graph, and prints the shortest import chains to each match. A pattern
/// that matches nothing is not an error; the contributing modules are
/// listed instead.
pub async fn execute(root: &Path, args: TraceArgs) -> Result<()> {
    let analyzer = utils::load_analyzer(root)?;
    let from = args.from.join(", ");
    ui::info(&format!("Building bundle for \"{from}\"..."));

    let (report, graph) = utils::with_spinner(
        "Capturing module graph...",
        analyzer.trace_with_graph(&args.from, &args.to),
    )
    .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!(
        "{}",
        render_report(&report, &graph, analyzer.package_root(), &from, &args.to)
    );
    Ok(())
}

fn size_label(bytes: u64) -> String {
    if bytes > 0 {
        format!("({})", ui::format_kb(bytes))
    } else {
        "(tree-shaken)".to_string()
    }
}

fn render_path(out: &mut String, path: &ImportPath, graph: &ModuleGraph, root: &Path) {
    let last = path.modules.len().saturating_sub(1);
    for (depth, id) in path.modules.iter().enumerate() {
        let prefix = match depth {
            0 => "┌",
            d if d == last => "└──",
            _ => "│──",
        };
        let size = graph.get(id).map(|node| node.rendered_length).unwrap_or(0);
        let _ = writeln!(
            out,
            "    {prefix} {}  {}",
            relative_id(id, root),
            ui::paint(size_label(size), Style::new().dimmed())
        );
    }
}

fn render_target(out: &mut String, target: &TracedTarget, graph: &ModuleGraph, root: &Path, from: &str) {
    let _ = writeln!(out, "{SEPARATOR}");
    let _ = writeln!(
        out,
        "Target: {}  ({} rendered)",
        ui::paint(relative_id(&target.id, root), Style::new().bold()),
        ui::format_kb(target.rendered_length)
    );
    let _ = writeln!(out, "{SEPARATOR}");

    match &target.outcome {
        TargetOutcome::Eliminated => {
            let _ = writeln!(
                out,
                "{}  This module is fully tree-shaken away (rendered length 0).",
                ui::paint("✓", Style::new().green())
            );
            let _ = writeln!(
                out,
                "   It is imported somewhere in the dependency graph but contributes no output code.\n"
            );
        }
        TargetOutcome::Unreachable => {
            let _ = writeln!(out, "No import path found from \"{from}\" to this module.\n");
        }
        TargetOutcome::Paths { paths } => {
            let _ = writeln!(out, "Found {} shortest import path(s):\n", paths.len());
            for (index, path) in paths.iter().enumerate() {
                let _ = writeln!(out, "  Path {}:", index + 1);
                render_path(out, path, graph, root);
                out.push('\n');
            }
        }
    }
}

fn render_report(
    report: &TraceReport,
    graph: &ModuleGraph,
    root: &Path,
    from: &str,
    pattern: &str,
) -> String {
    let mut out = String::new();
    match report {
        TraceReport::NoMatch { contributing } => {
            let _ = writeln!(out, "No modules matching \"{pattern}\" were found in the bundle.");
            let _ = writeln!(
                out,
                "Either the module is not in the bundle (tree-shaking is working!),"
            );
            let _ = writeln!(out, "or the name/pattern does not match any file path.");
            let _ = writeln!(out, "\nModules that contribute code to the bundle:");
            for module in contributing {
                let _ = writeln!(
                    out,
                    "  {}  ({})",
                    relative_id(&module.id, root),
                    ui::format_kb(module.rendered_length)
                );
            }
        }
        TraceReport::Matched { targets } => {
            for target in targets {
                render_target(&mut out, target, graph, root, from);
            }
            let all_unreachable = targets
                .iter()
                .all(|t| matches!(t.outcome, TargetOutcome::Unreachable));
            if all_unreachable {
                let _ = writeln!(
                    out,
                    "\n\"{pattern}\" modules are in the bundle but no import path was found."
                );
                let _ = writeln!(out, "This may indicate a dynamic import or a side-effect import.");
            }
        }
    }
    out
}
