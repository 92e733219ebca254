//! Conversion from CLI errors to miette reports.

use miette::Report;

use super::CliError;

/// Convert a `CliError` into a miette report for rendering in `main`.
///
/// Analysis errors keep their diagnostic code and help text; everything
/// else is rendered from its message.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Analysis(e) => bundler_error_to_miette(e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert a shakeout-bundler error into a miette report.
pub fn bundler_error_to_miette(err: shakeout_bundler::Error) -> Report {
    match err {
        shakeout_bundler::Error::Bundler(diagnostics) if diagnostics.is_empty() => {
            miette::miette!("Unknown bundler error")
        }
        other => Report::new(other),
    }
}
