//! Logging setup for the Shakeout CLI.
//!
//! Library crates log through `tracing`; this module installs the one
//! subscriber that prints those events to stderr. Results go to stdout, so
//! piping `--json` output stays clean at any verbosity.
//!
//! ```rust,no_run
//! use shakeout_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("measuring bundle");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str =
    "shakeout=debug,shakeout_bundler=debug,shakeout_graph=debug,shakeout_config=debug,shakeout_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "shakeout=info,shakeout_bundler=info,shakeout_cli=info";

/// Initialize the tracing subscriber.
///
/// The filter is chosen in this order:
/// 1. `--verbose`: DEBUG for the shakeout crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. INFO for the shakeout crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(select_filter(verbose, quiet), no_color);
}

/// Initialize the subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn select_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Whether log output should be colored.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise the
/// terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}
