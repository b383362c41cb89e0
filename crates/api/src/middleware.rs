use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

use routegate_auth::{IdentityProvider, Principal, parse_basic};

use crate::app::errors;
use crate::context::{PrincipalContext, RequestContext};

#[derive(Clone)]
pub struct AuthState {
    pub identity: Arc<dyn IdentityProvider>,
    pub realm: Arc<str>,
}

/// Resolve the caller before routing.
///
/// No `Authorization` header means an anonymous request; whether that is
/// acceptable is left to the route guard. A header that is present but
/// unusable is rejected here, even on open routes.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let ctx = RequestContext::capture(&req);

    if let Some(value) = req.headers().get(header::AUTHORIZATION) {
        match authenticate(&state, value) {
            Ok(principal) => {
                tracing::debug!(
                    request_id = %ctx.request_id(),
                    user = principal.name(),
                    "authenticated"
                );
                req.extensions_mut().insert(PrincipalContext::new(principal));
            }
            Err(reason) => {
                tracing::info!(
                    request_id = %ctx.request_id(),
                    method = %ctx.method(),
                    path = ctx.path(),
                    reason,
                    "authentication failed"
                );
                return errors::unauthorized(&state.realm, reason);
            }
        }
    }

    req.extensions_mut().insert(ctx);
    next.run(req).await
}

fn authenticate(state: &AuthState, value: &HeaderValue) -> Result<Principal, &'static str> {
    let value = value.to_str().map_err(|_| "authorization header is not ASCII")?;
    let credentials = parse_basic(value).map_err(|_| "malformed basic credentials")?;
    state
        .identity
        .authenticate(&credentials)
        .map_err(|_| "invalid credentials")
}
