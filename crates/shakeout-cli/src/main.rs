//! Shakeout CLI - tree-shaking analysis for compiled component libraries.
//!
//! Parses arguments, initializes logging and colors, and dispatches to the
//! command implementations. CTRL-C cancels the running command; pending
//! builds are dropped and their temporary entry files removed.

use clap::Parser;
use miette::Result;
use shakeout_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let root = args.root;
    let run = async move {
        match args.command {
            cli::Command::Report(report_args) => commands::report_execute(&root, report_args).await,
            cli::Command::Trace(trace_args) => commands::trace_execute(&root, trace_args).await,
            cli::Command::Check(check_args) => commands::check_execute(&root, check_args).await,
            cli::Command::Treemap(treemap_args) => {
                commands::treemap_execute(&root, treemap_args).await
            }
            cli::Command::Symbols(symbols_args) => commands::symbols_execute(&root, symbols_args),
        }
    };

    let result = tokio::select! {
        result = run => result,
        _ = tokio::signal::ctrl_c() => Err(error::CliError::Interrupted),
    };

    result.map_err(error::cli_error_to_miette)
}
