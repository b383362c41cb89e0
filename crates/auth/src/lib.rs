//! `routegate-auth`: authentication and authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP: it parses credentials,
//! resolves principals and evaluates access rules, nothing more.

pub mod authorize;
pub mod credentials;
pub mod identity;
pub mod principal;
pub mod roles;

pub use authorize::{AccessChecker, AccessRule, AlwaysFalseChecker, AuthzError, authorize};
pub use credentials::{BasicCredentials, CredentialsError, parse_basic};
pub use identity::{
    AuthenticationError, DuplicateUser, EmbeddedIdentityProvider, IdentityProvider, UserEntry,
};
pub use principal::Principal;
pub use roles::Role;
