//! Command-line interface definition for Shakeout.
//!
//! # Command Structure
//!
//! - `shakeout report <SYMBOL>...` - bundle size at every stage
//! - `shakeout trace --from <SYMBOL>... --to <PATTERN>` - import chains to a module
//! - `shakeout check [SYMBOL]...` - co-bundling sweep against curated expectations
//! - `shakeout treemap [SYMBOL]...` - size tree written as JSON
//! - `shakeout symbols` - exported names of the compiled entry

mod commands;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{CheckArgs, Command, ReportArgs, SymbolsArgs, TraceArgs, TreemapArgs};

/// Shakeout - tree-shaking analysis for compiled component libraries
#[derive(Parser, Debug)]
#[command(
    name = "shakeout",
    version,
    about = "Tree-shaking analysis for compiled component libraries",
    long_about = "Shakeout bundles any subset of a library's exports with Rolldown and reports\n\
                  how much code survives tree-shaking, which other tracked components get\n\
                  pulled in, and the import chains that keep an unwanted module alive."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Package root holding package.json and the compiled library
    #[arg(long, global = true, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
