//! Presentation adapters for load telemetry.
//!
//! This crate provides:
//! - `LogWindow` - A `LoadObserver` that renders events into log entries
//! - `LogEntry` - Structured entry with human and JSON formatting

mod logging;

pub use logging::*;
