//! Shakeout CLI - tree-shaking analysis for compiled component libraries.
//!
//! Exposes the `shakeout-bundler` analyses as subcommands:
//!
//! - `report` - bundle size at every optimization stage
//! - `trace` - why a module ends up in a bundle
//! - `check` - which tracked symbols each symbol drags in, judged against
//!   the curated expectations
//! - `treemap` - size tree of a bundle, written as JSON
//! - `symbols` - every name the compiled entry exports
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - one module per subcommand
//! - [`error`] - CLI errors with actionable hints
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - terminal output helpers

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
