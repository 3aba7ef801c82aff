//! Observability for the Orchard tooling.
//!
//! This crate provides:
//! - `LoggingConfig` / `init_logging` - `tracing` subscriber setup
//! - `PhaseTimings` - Per-phase timing collection for a command run

mod logging;
mod timing;

pub use logging::*;
pub use timing::*;
