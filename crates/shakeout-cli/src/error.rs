//! Error handling for the Shakeout CLI.
//!
//! Analysis failures come from `shakeout-bundler` and keep their own
//! diagnostic codes and help. Everything the CLI adds on top (argument
//! problems, failed checks, interruption) carries a hint in its message.

mod report;

use thiserror::Error;

pub use report::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Analysis errors (missing compiled output, bundler diagnostics, etc.)
    #[error(transparent)]
    Analysis(#[from] shakeout_bundler::Error),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}\n\nHint: Check shakeout.toml or the \"shakeout\" field in package.json")]
    Config(#[from] shakeout_config::ConfigError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// `--category` named something other than a tracked category
    #[error("Unknown category '{0}'\n\nHint: Available categories are chart, cartesian and polar")]
    UnknownCategory(String),

    /// No symbols to work on after applying defaults
    #[error("No symbols to analyze\n\nHint: Pass symbols explicitly or list tracked symbols in shakeout.toml")]
    NoSymbols,

    /// At least one symbol failed the co-bundling check
    #[error("{failed} of {total} symbols failed the tree-shaking check\n\nHint: Fix the imports or update the expected groups and known issues in shakeout.toml")]
    CheckFailed { failed: usize, total: usize },

    /// Cancelled with CTRL-C
    #[error("Interrupted")]
    Interrupted,

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Add a helpful hint to the error message.
    ///
    /// ```rust,no_run
    /// # use shakeout_cli::error::{Result, ResultExt, CliError};
    /// # fn run() -> Result<()> {
    /// fn load() -> Result<()> {
    ///     Err(CliError::Custom("parsing failed".into()))
    /// }
    /// load().with_hint("Check for trailing commas in package.json")?;
    /// # Ok(())
    /// # }
    /// ```
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}
