//! Core types for the sequenced script loading pipeline.
//!
//! This crate provides the fundamental types and traits:
//! - `LoaderConfig` - Base path, telemetry switch and timeouts
//! - `LoadRequest` - Static, dynamic and main resource groups
//! - `LoadSession` - Per-loader timing and resource containers
//! - `LoadEvent` / `LoadObserver` - Telemetry for presentation adapters
//! - `ResourceLoadError` / `GroupLoadError` / `LoadError` - Failure model

mod config;
mod error;
mod lifecycle;
mod request;
mod session;

pub use config::*;
pub use error::*;
pub use lifecycle::*;
pub use request::*;
pub use session::*;
