use std::collections::BTreeSet;

use serde::Serialize;

use crate::Role;

/// An authenticated caller: an identity plus the roles granted to it.
///
/// Principals are produced by an [`IdentityProvider`](crate::IdentityProvider)
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    name: String,
    roles: BTreeSet<Role>,
}

impl Principal {
    pub fn new(name: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            name: name.into(),
            roles: roles.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    /// True when the principal holds at least one of `wanted`.
    pub fn has_any_role<'a>(&self, wanted: impl IntoIterator<Item = &'a Role>) -> bool {
        wanted.into_iter().any(|r| self.roles.contains(r))
    }
}
