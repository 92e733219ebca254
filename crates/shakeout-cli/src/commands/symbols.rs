//! Symbols command implementation.

use std::path::Path;

use crate::cli::SymbolsArgs;
use crate::commands::utils;
use crate::error::Result;

/// Execute the symbols command: every name importable from the compiled
/// entry, sorted, one per line.
pub fn execute(root: &Path, args: SymbolsArgs) -> Result<()> {
    let analyzer = utils::load_analyzer(root)?;
    let symbols = analyzer.exported_symbols()?;
    tracing::debug!(count = symbols.len(), "exports listed");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&symbols)?);
    } else {
        for symbol in &symbols {
            println!("{symbol}");
        }
    }
    Ok(())
}
