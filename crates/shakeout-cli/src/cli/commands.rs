use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Available Shakeout subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report bundle size at every optimization stage
    ///
    /// Bundles the given symbols from the compiled library and prints the
    /// raw folder, tree-shaken, minified and minified+compressed sizes.
    Report(ReportArgs),

    /// Explain why modules matching a pattern are in a bundle
    ///
    /// Prints the shortest import chains from the synthesized entry to every
    /// module whose path matches the pattern.
    Trace(TraceArgs),

    /// Check which tracked symbols each symbol pulls in
    ///
    /// Builds every symbol alone and compares the tracked names found in its
    /// bundle with the expected groups and known issues. Exits non-zero when
    /// any symbol fails.
    Check(CheckArgs),

    /// Write the size tree of a bundle as JSON
    Treemap(TreemapArgs),

    /// List every name exported by the compiled entry
    Symbols(SymbolsArgs),
}

/// Arguments for the report command
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Exported symbols to import
    ///
    /// Examples:
    ///   shakeout report LineChart
    ///   shakeout report Line XAxis YAxis
    #[arg(required = true, value_name = "SYMBOL")]
    pub symbols: Vec<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the trace command
#[derive(Args, Debug)]
pub struct TraceArgs {
    /// Symbols whose bundle is traced
    #[arg(long, required = true, num_args = 1.., value_name = "SYMBOL")]
    pub from: Vec<String>,

    /// Module pattern: a path fragment or a file name without extension
    ///
    /// Matched case-insensitively against module paths relative to the
    /// package root.
    #[arg(long, value_name = "PATTERN")]
    pub to: String,

    /// Print the trace as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Symbols to check (default: every tracked symbol)
    #[arg(value_name = "SYMBOL", conflicts_with = "category")]
    pub symbols: Vec<String>,

    /// Check only one tracked category (chart, cartesian or polar)
    #[arg(long, value_name = "NAME", conflicts_with = "exports")]
    pub category: Option<String>,

    /// Check every symbol the compiled entry exports
    #[arg(long, conflicts_with = "symbols")]
    pub exports: bool,

    /// Print the results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the treemap command
#[derive(Args, Debug)]
pub struct TreemapArgs {
    /// Symbols to bundle (default: every tracked symbol)
    #[arg(value_name = "SYMBOL")]
    pub symbols: Vec<String>,

    /// Output file, relative to the package root
    #[arg(
        short,
        long,
        default_value = "bundle-viz/src/bundle-data.json",
        value_name = "FILE"
    )]
    pub out: PathBuf,
}

/// Arguments for the symbols command
#[derive(Args, Debug)]
pub struct SymbolsArgs {
    /// Print the names as a JSON array
    #[arg(long)]
    pub json: bool,
}
