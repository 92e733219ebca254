//! Treemap command implementation.

use std::path::Path;

use crate::cli::TreemapArgs;
use crate::commands::utils;
use crate::error::{Result, ResultExt};
use crate::ui;

/// Execute the treemap command.
///
/// Bundles the symbols (every tracked symbol by default) and writes the
/// size tree to `--out`, relative to the package root.
pub async fn execute(root: &Path, args: TreemapArgs) -> Result<()> {
    let analyzer = utils::load_analyzer(root)?;
    let symbols = utils::symbols_or_tracked(args.symbols, &analyzer.config().tracked)?;
    let out = utils::resolve_path(&args.out, analyzer.package_root());

    ui::info(&format!("Building tree-shaken bundle for: {}", symbols.join(", ")));
    let data = utils::with_spinner("Bundling...", analyzer.treemap(&symbols)).await?;

    if data.total_size == 0 {
        ui::warning("No module contributes code; every requested symbol was tree-shaken away");
    }
    data.write_to(&out)
        .with_hint("Choose a writable location with --out")?;

    println!("Total bundle size : {}", ui::format_kb(data.total_size));
    println!("Modules included  : {}", data.module_count());
    println!("Data written to   : {}", out.display());
    Ok(())
}
