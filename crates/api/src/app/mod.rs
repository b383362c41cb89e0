//! HTTP application wiring (Axum router + middleware stack).
//!
//! - `routes/`: HTTP routes + handlers (one file per controller)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, middleware::from_fn_with_state};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use routegate_auth::{EmbeddedIdentityProvider, IdentityProvider};

use crate::config::ApiConfig;
use crate::exception::{self, ExceptionMapper};
use crate::middleware::{self, AuthState};

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router from configuration (entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> Result<Router> {
    let identity = EmbeddedIdentityProvider::new(config.users.iter().cloned())
        .context("Invalid user table")?;
    tracing::info!(users = identity.len(), realm = %config.realm, "identity provider ready");

    Ok(build_router(
        Arc::new(identity),
        Arc::from(config.realm.as_str()),
        routes::exceptions::exception_mapper(),
    ))
}

/// Assemble routes and the request pipeline:
/// trace → authenticate → exception mapping → route guard → handler.
pub fn build_router(
    identity: Arc<dyn IdentityProvider>,
    realm: Arc<str>,
    mapper: ExceptionMapper,
) -> Router {
    tracing::debug!(mappings = mapper.len(), "exception mapper ready");

    let auth_state = AuthState {
        identity,
        realm: realm.clone(),
    };

    routes::router(realm)
        .fallback(routes::system::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn_with_state(auth_state, middleware::auth_middleware))
                .layer(from_fn_with_state(
                    Arc::new(mapper),
                    exception::exception_middleware,
                )),
        )
}
