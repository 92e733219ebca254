//! Report command implementation.

use std::path::Path;
use std::time::Instant;

use owo_colors::Style;
use shakeout_bundler::{BundleSizeReport, BundleStage};

use crate::cli::ReportArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the report command.
///
/// Prints one row per stage: raw folder, tree-shaken, minified and
/// minified+compressed, each with its reduction relative to the raw folder.
pub async fn execute(root: &Path, args: ReportArgs) -> Result<()> {
    let analyzer = utils::load_analyzer(root)?;
    let started = Instant::now();

    let message = format!("Bundling {}...", args.symbols.join(", "));
    let report = utils::with_spinner(&message, analyzer.report(&args.symbols)).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", render_table(&report));
    ui::success(&format!(
        "Measured {} in {}",
        report.components.join(", "),
        ui::format_duration(started.elapsed())
    ));
    Ok(())
}

fn render_table(report: &BundleSizeReport) -> String {
    let mut out = format!(
        "{}\n",
        ui::paint(
            format!("{:<20} {:>12} {:>12} {:>10}", "Stage", "Bytes", "Size", "Reduction"),
            Style::new().bold()
        )
    );
    for stage in &report.stages {
        out.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>10}\n",
            stage.stage,
            stage.bytes,
            stage.human_readable_size,
            ui::format_reduction(
                stage.reduction_from_baseline_percent,
                stage.stage == BundleStage::RawFolder
            ),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_a_row_per_stage() {
        ui::init_colors(true);
        let report = BundleSizeReport::from_sizes(vec!["Line".into()], 10_240, 2048, 1024, 256);
        let table = render_table(&report);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Stage"));
        assert!(lines[1].starts_with("raw-folder"));
        assert!(lines[1].ends_with('-'));
        assert!(lines[2].contains("2048"));
        assert!(lines[2].ends_with("80.00%"));
        assert!(lines[4].starts_with("minified+compressed"));
        assert!(lines[4].ends_with("97.50%"));
    }
}
