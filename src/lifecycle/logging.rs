//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing` subscriber filtered by `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cargo run
//!
//! # Request payloads and dropped late responses
//! RUST_LOG=debug cargo run
//!
//! # Only the in-process backend
//! RUST_LOG=resource_framework=debug cargo run
//! ```
//!
//! Client calls open a span named after the operation (`find`, `save`, ...), so the
//! compact output reads `save:create: Sending request`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
