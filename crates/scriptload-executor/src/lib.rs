//! Sequenced script loading.
//!
//! This crate drives the load pipeline:
//! - `ResourceHost` - Attaches resources to the document
//! - `load_resource` - Single resource load with timing
//! - `load_group` - Strictly sequential, fail-fast group loading
//! - `Loader` - Statics and dynamics, then the main resource

mod group;
mod host;
mod loader;
mod resource;
mod telemetry;
mod timeout;

pub use group::*;
pub use host::*;
pub use loader::*;
pub use resource::*;
pub use telemetry::*;
pub use timeout::*;
