//! `routegate-core`: greeting domain behind the JSON endpoints.
//!
//! This crate contains **pure domain** code (no HTTP concerns).

pub mod error;
pub mod greeting;

pub use error::{DomainError, DomainResult};
pub use greeting::{Greeting, PersonName};
