//! Public SDK for sequenced script loading.
//!
//! This crate re-exports the loader, its types and the log window:
//!
//! ```ignore
//! use std::sync::Arc;
//! use scriptload_sdk::prelude::*;
//!
//! let window = Arc::new(LogWindow::new("Loader"));
//! let config = LoaderConfig::new("/assets/js/").with_logger(true);
//! let mut loader = Loader::new(config, host).with_observer(window.clone());
//!
//! let request = LoadRequest::new()
//!     .with_statics(["vendor/runtime", "vendor/ui"])
//!     .with_dynamics(["pages/home"])
//!     .with_main("index");
//!
//! let report = loader.init(&request).await?;
//! println!("{}", window.render());
//!
//! // Swap the page scripts later on.
//! loader.reset();
//! ```

pub use scriptload_core;
pub use scriptload_executor;
pub use scriptload_observability;

/// Prelude for convenient imports.
pub mod prelude {
    pub use scriptload_core::*;
    pub use scriptload_executor::*;
    pub use scriptload_observability::*;
}
