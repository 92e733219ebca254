//! Rolldown plugins used by every tree-shaking build.

pub mod graph_capture;
pub mod resolve;

pub use graph_capture::GraphCapture;
pub use resolve::TreeshakeResolvePlugin;
