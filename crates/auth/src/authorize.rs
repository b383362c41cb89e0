use std::sync::Arc;

use thiserror::Error;

use crate::{Principal, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// No principal was presented for a rule that needs one.
    #[error("authentication required")]
    Unauthenticated,

    #[error("forbidden: {0}")]
    Forbidden(String),
}

/// Custom access predicate evaluated against an authenticated principal.
///
/// Mirrors expression-style checks (`@checker.check(...)`) where a named
/// component decides access instead of a fixed role list.
pub trait AccessChecker: Send + Sync {
    /// Stable name used in logs and denial messages.
    fn name(&self) -> &str;

    fn check(&self, principal: &Principal) -> bool;
}

/// Checker that denies everyone.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysFalseChecker;

impl AccessChecker for AlwaysFalseChecker {
    fn name(&self) -> &str {
        "alwaysFalseChecker"
    }

    fn check(&self, _principal: &Principal) -> bool {
        false
    }
}

/// Access rule attached to a route or to a whole controller.
#[derive(Clone)]
pub enum AccessRule {
    /// Anyone, including anonymous callers.
    PermitAll,
    /// Nobody; authenticated callers get `Forbidden`.
    DenyAll,
    /// Any authenticated principal.
    Authenticated,
    /// Principal must hold at least one of these roles.
    AnyRole(Vec<Role>),
    /// Principal must satisfy the checker.
    Check(Arc<dyn AccessChecker>),
}

impl AccessRule {
    pub fn any_role<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        Self::AnyRole(roles.into_iter().map(Into::into).collect())
    }

    pub fn check(checker: impl AccessChecker + 'static) -> Self {
        Self::Check(Arc::new(checker))
    }

    pub fn describe(&self) -> String {
        match self {
            Self::PermitAll => "permitAll".to_string(),
            Self::DenyAll => "denyAll".to_string(),
            Self::Authenticated => "authenticated".to_string(),
            Self::AnyRole(roles) => {
                let names: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
                format!("anyRole({})", names.join(","))
            }
            Self::Check(checker) => format!("check({})", checker.name()),
        }
    }
}

impl core::fmt::Debug for AccessRule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Evaluate `rule` for an optional principal.
///
/// - No IO
/// - No panics
/// - Anonymous callers only pass `PermitAll`
pub fn authorize(principal: Option<&Principal>, rule: &AccessRule) -> Result<(), AuthzError> {
    if let AccessRule::PermitAll = rule {
        return Ok(());
    }

    let principal = principal.ok_or(AuthzError::Unauthenticated)?;

    match rule {
        AccessRule::PermitAll | AccessRule::Authenticated => Ok(()),
        AccessRule::DenyAll => Err(AuthzError::Forbidden("access denied to everyone".to_string())),
        AccessRule::AnyRole(roles) => {
            if principal.has_any_role(roles) {
                Ok(())
            } else {
                Err(AuthzError::Forbidden(format!(
                    "'{}' lacks any of the roles {}",
                    principal.name(),
                    rule.describe()
                )))
            }
        }
        AccessRule::Check(checker) => {
            if checker.check(principal) {
                Ok(())
            } else {
                Err(AuthzError::Forbidden(format!(
                    "'{}' rejected by {}",
                    principal.name(),
                    checker.name()
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn principal(roles: &[&'static str]) -> Principal {
        Principal::new("someone", roles.iter().copied().map(Role::from_static))
    }

    struct NameIs(&'static str);

    impl AccessChecker for NameIs {
        fn name(&self) -> &str {
            "nameIs"
        }

        fn check(&self, principal: &Principal) -> bool {
            principal.name() == self.0
        }
    }

    #[test]
    fn permit_all_allows_anonymous() {
        assert_eq!(authorize(None, &AccessRule::PermitAll), Ok(()));
    }

    #[test]
    fn anonymous_is_unauthenticated_for_every_other_rule() {
        let rules = [
            AccessRule::DenyAll,
            AccessRule::Authenticated,
            AccessRule::any_role(["admin"]),
            AccessRule::check(AlwaysFalseChecker),
        ];
        for rule in &rules {
            assert_eq!(authorize(None, rule), Err(AuthzError::Unauthenticated), "{rule:?}");
        }
    }

    #[test]
    fn deny_all_forbids_even_admins() {
        let p = principal(&["admin"]);
        assert!(matches!(
            authorize(Some(&p), &AccessRule::DenyAll),
            Err(AuthzError::Forbidden(_))
        ));
    }

    #[test]
    fn any_role_accepts_either_role() {
        let rule = AccessRule::any_role(["user", "viewer"]);
        assert_eq!(authorize(Some(&principal(&["user"])), &rule), Ok(()));
        assert_eq!(authorize(Some(&principal(&["viewer"])), &rule), Ok(()));
        assert!(authorize(Some(&principal(&["guest"])), &rule).is_err());
    }

    #[test]
    fn empty_role_list_denies() {
        let rule = AccessRule::AnyRole(Vec::new());
        assert!(authorize(Some(&principal(&["admin"])), &rule).is_err());
    }

    #[test]
    fn checker_decides() {
        let p = principal(&["admin"]);
        assert!(authorize(Some(&p), &AccessRule::check(AlwaysFalseChecker)).is_err());
        assert_eq!(authorize(Some(&p), &AccessRule::check(NameIs("someone"))), Ok(()));
    }

    #[test]
    fn describe_is_readable() {
        assert_eq!(AccessRule::any_role(["user", "viewer"]).describe(), "anyRole(user,viewer)");
        assert_eq!(
            AccessRule::check(AlwaysFalseChecker).describe(),
            "check(alwaysFalseChecker)"
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: AnyRole grants access exactly when the role sets intersect.
        #[test]
        fn any_role_matches_set_intersection(
            held in prop::collection::btree_set("[a-d]", 0..4),
            wanted in prop::collection::vec("[a-d]", 0..4),
        ) {
            let p = Principal::new("p", held.iter().cloned().map(Role::from));
            let rule = AccessRule::any_role(wanted.iter().cloned().map(Role::from));
            let expected = wanted.iter().any(|w| held.contains(w));
            prop_assert_eq!(authorize(Some(&p), &rule).is_ok(), expected);
        }

        /// Property: Authenticated admits every principal regardless of roles.
        #[test]
        fn authenticated_ignores_roles(held in prop::collection::vec("[a-z]{1,8}", 0..5)) {
            let p = Principal::new("p", held.into_iter().map(Role::from));
            prop_assert!(authorize(Some(&p), &AccessRule::Authenticated).is_ok());
        }
    }
}
