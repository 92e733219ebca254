//! # shakeout-config
//!
//! Configuration for tree-shaking analysis of a compiled component library:
//! where the compiled ES module tree lives, which imports stay external,
//! which exported symbols are tracked, and the curated expectations
//! (expected bundle groups and known issues) the oracle checks against.
//!
//! Built-in defaults describe a charting library compiled to `es6/`. A
//! project overrides them with `shakeout.toml` or a `shakeout` field in its
//! `package.json`.

pub mod config;
pub mod curated;
pub mod discovery;
pub mod error;

pub use config::{AnalysisSettings, ExternalsConfig, LibraryLayout, ShakeoutConfig, TrackedSymbols};
pub use curated::{ExpectedBundleGroup, KnownIssue};
pub use discovery::{ConfigDiscovery, discover};
pub use error::{ConfigError, Result};
