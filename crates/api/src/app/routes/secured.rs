//! Role-gated endpoints under `/api`.
//!
//! The controller default is `Authenticated`; individual routes narrow or
//! widen it.

use std::sync::Arc;

use axum::{Router, routing::get};

use routegate_auth::{AccessRule, AlwaysFalseChecker, Role};

use crate::authz::SecuredRouter;

pub const ADMIN: Role = Role::from_static("admin");
pub const USER: Role = Role::from_static("user");
pub const VIEWER: Role = Role::from_static("viewer");

pub fn router(realm: Arc<str>) -> Router {
    SecuredRouter::new(AccessRule::Authenticated, realm)
        .route_with("/securedMethod", get(secured_method), AccessRule::any_role([ADMIN]))
        .route_with(
            "/allowedForUserOrViewer",
            get(allowed_for_user_or_viewer),
            AccessRule::any_role([USER, VIEWER]),
        )
        .route_with(
            "/withAlwaysFalseChecker",
            get(with_always_false_checker),
            AccessRule::check(AlwaysFalseChecker),
        )
        .route("/preAuthorizeOnController", get(pre_authorize_on_controller))
        .route_with("/accessibleForAllMethod", get(accessible_for_all), AccessRule::PermitAll)
        .route("/restrictedOnClass", get(restricted_on_class))
        .route_with("/restrictedOnMethod", get(restricted_on_method), AccessRule::any_role([ADMIN]))
        .into_router()
}

pub async fn secured_method() -> &'static str {
    "accessibleForAdminOnly"
}

pub async fn allowed_for_user_or_viewer() -> &'static str {
    "allowedForUserOrViewer"
}

pub async fn with_always_false_checker() -> &'static str {
    "withAlwaysFalseChecker"
}

pub async fn pre_authorize_on_controller() -> &'static str {
    "preAuthorizeOnController"
}

pub async fn accessible_for_all() -> &'static str {
    "accessibleForAll"
}

pub async fn restricted_on_class() -> &'static str {
    "restrictedOnClass"
}

pub async fn restricted_on_method() -> &'static str {
    "restrictedOnMethod"
}
