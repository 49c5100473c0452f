//! Change-detection and notification pipeline.
//!
//! One check run flows fetch → diff → snapshot replace → fan-out. The fetch
//! lives in `crate::content`; this module owns the diff, the remembered
//! snapshot, and the dispatcher.

mod diff;
mod dispatch;
mod snapshot;

pub use diff::detect;
pub use dispatch::Dispatcher;
pub use snapshot::ContentSnapshot;
