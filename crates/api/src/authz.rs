//! Route-level access control.
//!
//! Every guarded route carries a [`RouteGuard`] layer that runs before the
//! handler, so a denied request never reaches handler code.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    middleware::{Next, from_fn_with_state},
    response::Response,
    routing::MethodRouter,
};

use routegate_auth::{AccessRule, AuthzError, authorize};

use crate::app::errors;
use crate::context::{PrincipalContext, RequestContext};

#[derive(Debug, Clone)]
pub struct RouteGuard {
    rule: AccessRule,
    realm: Arc<str>,
}

impl RouteGuard {
    pub fn new(rule: AccessRule, realm: Arc<str>) -> Self {
        Self { rule, realm }
    }
}

/// Evaluate the guard's rule against the principal attached by
/// [`auth_middleware`](crate::middleware::auth_middleware).
pub async fn access_filter(State(guard): State<RouteGuard>, req: Request, next: Next) -> Response {
    let decision = authorize(
        req.extensions()
            .get::<PrincipalContext>()
            .map(PrincipalContext::principal),
        &guard.rule,
    );

    let Err(denied) = decision else {
        return next.run(req).await;
    };

    match req.extensions().get::<RequestContext>() {
        Some(ctx) => tracing::info!(
            request_id = %ctx.request_id(),
            method = %ctx.method(),
            path = ctx.path(),
            received_at = %ctx.received_at(),
            rule = %guard.rule.describe(),
            reason = %denied,
            "access denied"
        ),
        None => tracing::info!(
            path = req.uri().path(),
            rule = %guard.rule.describe(),
            reason = %denied,
            "access denied"
        ),
    }

    match denied {
        AuthzError::Unauthenticated => errors::unauthorized(&guard.realm, "authentication required"),
        AuthzError::Forbidden(_) => errors::forbidden("access denied"),
    }
}

/// Router builder with a controller-wide default rule and per-route overrides.
///
/// Routes added with [`route`](Self::route) inherit the default rule; routes
/// added with [`route_with`](Self::route_with) replace it entirely.
pub struct SecuredRouter {
    router: Router,
    default_rule: AccessRule,
    realm: Arc<str>,
}

impl SecuredRouter {
    pub fn new(default_rule: AccessRule, realm: Arc<str>) -> Self {
        Self {
            router: Router::new(),
            default_rule,
            realm,
        }
    }

    pub fn route(self, path: &str, method_router: MethodRouter) -> Self {
        let rule = self.default_rule.clone();
        self.route_with(path, method_router, rule)
    }

    pub fn route_with(mut self, path: &str, method_router: MethodRouter, rule: AccessRule) -> Self {
        tracing::trace!(path, rule = %rule.describe(), "registering guarded route");
        let guard = RouteGuard::new(rule, self.realm.clone());
        self.router = self
            .router
            .route(path, method_router.route_layer(from_fn_with_state(guard, access_filter)));
        self
    }

    pub fn into_router(self) -> Router {
        self.router
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{self, StatusCode, header},
        routing::get,
    };
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use tower::ServiceExt;

    use routegate_auth::{AlwaysFalseChecker, EmbeddedIdentityProvider, Role, UserEntry};

    use super::*;
    use crate::middleware::{AuthState, auth_middleware};

    async fn ok() -> &'static str {
        "ok"
    }

    fn app() -> Router {
        let realm: Arc<str> = Arc::from("test");
        let identity = EmbeddedIdentityProvider::new([
            UserEntry::new("admin", "pw", [Role::new("admin")]),
            UserEntry::new("plain", "pw", []),
        ])
        .unwrap();
        let auth = AuthState {
            identity: Arc::new(identity),
            realm: realm.clone(),
        };

        SecuredRouter::new(AccessRule::Authenticated, realm)
            .route("/default", get(ok))
            .route_with("/open", get(ok), AccessRule::PermitAll)
            .route_with("/admin", get(ok), AccessRule::any_role(["admin"]))
            .route_with("/never", get(ok), AccessRule::check(AlwaysFalseChecker))
            .into_router()
            .layer(from_fn_with_state(auth, auth_middleware))
    }

    async fn status(path: &str, user: Option<&str>) -> StatusCode {
        let mut req = http::Request::builder().uri(path);
        if let Some(user) = user {
            let value = format!("Basic {}", STANDARD.encode(format!("{user}:pw")));
            req = req.header(header::AUTHORIZATION, value);
        }
        let res = app().oneshot(req.body(Body::empty()).unwrap()).await.unwrap();
        res.status()
    }

    #[tokio::test]
    async fn default_rule_applies_to_plain_routes() {
        assert_eq!(status("/default", None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status("/default", Some("plain")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn override_can_open_a_route() {
        assert_eq!(status("/open", None).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn override_can_narrow_a_route() {
        assert_eq!(status("/admin", None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status("/admin", Some("plain")).await, StatusCode::FORBIDDEN);
        assert_eq!(status("/admin", Some("admin")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn checker_denial_is_forbidden() {
        assert_eq!(status("/never", Some("admin")).await, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn forbidden_body_does_not_reveal_the_rule() {
        let value = format!("Basic {}", STANDARD.encode("plain:pw"));
        let res = app()
            .oneshot(
                http::Request::builder()
                    .uri("/admin")
                    .header(header::AUTHORIZATION, value)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "forbidden");
        assert_eq!(body["message"], "access denied");
    }

    #[tokio::test]
    async fn challenge_names_the_realm() {
        let res = app()
            .oneshot(http::Request::builder().uri("/default").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            res.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"test\""
        );
    }

    #[tokio::test]
    async fn wrong_method_is_not_guarded() {
        let res = app()
            .oneshot(
                http::Request::builder()
                    .method("POST")
                    .uri("/admin")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
