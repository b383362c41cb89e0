//! Tracing and logging setup shared by the binaries and tests.

/// Tracing configuration (filters, formats).
pub mod tracing;

pub use tracing::{LogFormat, init};
