//! Application wiring and lifecycle.
//!
//! - [`BeerApp`] starts a backend, routes paths to view controllers and shuts down
//! - [`setup_tracing`] installs the log subscriber

pub mod app;
pub mod logging;

pub use app::*;
pub use logging::*;
