//! HTTP API: routing, access control, request binding and exception mapping.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod exception;
pub mod extract;
pub mod middleware;
