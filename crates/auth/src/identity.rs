//! Identity lookup: turns presented credentials into a [`Principal`].

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::{BasicCredentials, Principal, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// Unknown user or wrong password. The two are deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// Source of authenticated principals.
///
/// The HTTP layer only sees this trait; a directory or token service can be
/// slotted in without touching the access filter.
pub trait IdentityProvider: Send + Sync {
    fn authenticate(&self, credentials: &BasicCredentials) -> Result<Principal, AuthenticationError>;
}

/// One row of the embedded user table.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct UserEntry {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl UserEntry {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            roles: roles.into_iter().collect(),
        }
    }
}

impl core::fmt::Debug for UserEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UserEntry")
            .field("username", &self.username)
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("user '{0}' is defined more than once")]
pub struct DuplicateUser(pub String);

/// In-memory user table with plain-text passwords.
///
/// Stands in for an external identity store in development and tests.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedIdentityProvider {
    users: HashMap<String, UserEntry>,
}

impl EmbeddedIdentityProvider {
    pub fn new(entries: impl IntoIterator<Item = UserEntry>) -> Result<Self, DuplicateUser> {
        let mut users = HashMap::new();
        for entry in entries {
            if users.contains_key(&entry.username) {
                return Err(DuplicateUser(entry.username));
            }
            users.insert(entry.username.clone(), entry);
        }
        Ok(Self { users })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl IdentityProvider for EmbeddedIdentityProvider {
    fn authenticate(&self, credentials: &BasicCredentials) -> Result<Principal, AuthenticationError> {
        let entry = self
            .users
            .get(&credentials.username)
            .ok_or(AuthenticationError::InvalidCredentials)?;

        if entry.password != credentials.password {
            tracing::debug!(user = %credentials.username, "password mismatch");
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(Principal::new(entry.username.clone(), entry.roles.iter().cloned()))
    }
}
