//! Command implementations.
//!
//! Each subcommand lives in its own module and exposes an `execute`
//! function taking the package root and the parsed arguments. Results go to
//! stdout; progress and status lines go to stderr.

pub mod check;
pub mod report;
pub mod symbols;
pub mod trace;
pub mod treemap;
pub(crate) mod utils;

pub use check::execute as check_execute;
pub use report::execute as report_execute;
pub use symbols::execute as symbols_execute;
pub use trace::execute as trace_execute;
pub use treemap::execute as treemap_execute;
