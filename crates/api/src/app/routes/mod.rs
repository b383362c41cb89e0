use std::sync::Arc;

use axum::{Router, routing::get};

use routegate_auth::AccessRule;

use crate::authz::SecuredRouter;

pub mod exceptions;
pub mod greeting;
pub mod secured;
pub mod system;

/// Router for every endpoint; guards are attached per route.
pub fn router(realm: Arc<str>) -> Router {
    let authenticated = SecuredRouter::new(AccessRule::Authenticated, realm.clone())
        .route("/whoami", get(system::whoami))
        .into_router();

    Router::new()
        .route("/health", get(system::health))
        .route("/hello", get(system::hello))
        .merge(authenticated)
        .nest("/api", secured::router(realm))
        .nest("/greeting", greeting::router())
        .nest("/exception", exceptions::router())
}
