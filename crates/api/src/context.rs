use std::sync::Arc;

use axum::http::{Method, Request};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use routegate_auth::Principal;

/// Per-request facts captured before any handler runs.
///
/// Immutable; inserted once by the authentication middleware.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: Uuid,
    method: Method,
    path: String,
    received_at: DateTime<Utc>,
}

impl RequestContext {
    pub fn capture<B>(req: &Request<B>) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            method: req.method().clone(),
            path: req.uri().path().to_string(),
            received_at: Utc::now(),
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}

/// Authenticated principal for a request. Absent for anonymous callers.
#[derive(Debug, Clone)]
pub struct PrincipalContext {
    principal: Arc<Principal>,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self {
            principal: Arc::new(principal),
        }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }
}
