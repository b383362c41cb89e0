//! Exception-to-response mapping.
//!
//! Handlers return `Result<T, Raised>`. A raised error is parked in the
//! response extensions and [`exception_middleware`] rewrites that response
//! using the first matching entry of an [`ExceptionMapper`]. Callers never see
//! raw error text unless a mapping chooses to expose it.

use std::error::Error as StdError;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::context::RequestContext;

/// Error raised by a handler, to be resolved by the exception mapper.
#[derive(Debug)]
pub struct Raised(anyhow::Error);

impl<E> From<E> for Raised
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for Raised {
    fn into_response(self) -> Response {
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        res.extensions_mut().insert(RaisedException(Arc::new(self.0)));
        res
    }
}

/// Response-extension marker carrying the raised error to the middleware.
#[derive(Debug, Clone)]
pub struct RaisedException(Arc<anyhow::Error>);

impl RaisedException {
    pub fn error(&self) -> &anyhow::Error {
        &self.0
    }
}

/// Response with explicit status, headers and optional JSON body.
#[derive(Debug, Clone)]
pub struct ResponseEntity {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<serde_json::Value>,
}

impl ResponseEntity {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn json(mut self, body: &impl Serialize) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(value),
            Err(e) => tracing::error!(error = %e, "response entity body is not serializable"),
        }
        self
    }
}

impl IntoResponse for ResponseEntity {
    fn into_response(self) -> Response {
        let mut res = match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        };
        res.headers_mut().extend(self.headers);
        res
    }
}

/// What an exception handler produces.
#[derive(Debug, Clone)]
pub enum Reply {
    /// No body. Without a declared status this becomes 204.
    Empty,
    Text(String),
    Json(serde_json::Value),
    /// Full control: the entity's status and headers win over the mapping's.
    Entity(ResponseEntity),
}

impl Reply {
    pub fn json(body: &impl Serialize) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => Self::Json(value),
            Err(e) => {
                tracing::error!(error = %e, "exception reply is not serializable");
                Self::Empty
            }
        }
    }

    fn into_response(self, declared: Option<StatusCode>) -> Response {
        match self {
            Self::Empty => text(declared.unwrap_or(StatusCode::NO_CONTENT), String::new()),
            Self::Text(body) => text(declared.unwrap_or(StatusCode::OK), body),
            Self::Json(body) => (declared.unwrap_or(StatusCode::OK), Json(body)).into_response(),
            Self::Entity(entity) => entity.into_response(),
        }
    }
}

fn text(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))],
        body,
    )
        .into_response()
}

type Render = Box<dyn Fn(&anyhow::Error) -> Option<Reply> + Send + Sync>;

struct Mapping {
    type_name: &'static str,
    status: Option<StatusCode>,
    render: Render,
}

/// Outcome of resolving an error against the table.
pub struct Resolution {
    /// Type name of the matched mapping, `None` for the fallback.
    pub matched: Option<&'static str>,
    pub response: Response,
}

/// Ordered table of error type → response mappings. First match wins.
pub struct ExceptionMapper {
    mappings: Vec<Mapping>,
    fallback_status: StatusCode,
}

impl ExceptionMapper {
    pub fn builder() -> ExceptionMapperBuilder {
        ExceptionMapperBuilder {
            mappings: Vec::new(),
            fallback_status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn resolve(&self, err: &anyhow::Error) -> Resolution {
        for mapping in &self.mappings {
            if let Some(reply) = (mapping.render)(err) {
                return Resolution {
                    matched: Some(mapping.type_name),
                    response: reply.into_response(mapping.status),
                };
            }
        }

        Resolution {
            matched: None,
            response: text(self.fallback_status, String::new()),
        }
    }
}

pub struct ExceptionMapperBuilder {
    mappings: Vec<Mapping>,
    fallback_status: StatusCode,
}

impl ExceptionMapperBuilder {
    /// Map `E` to a bare status with an empty body.
    pub fn status<E>(self, status: StatusCode) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.handle::<E, _>(Some(status), |_| Reply::Empty)
    }

    /// Map `E` through `render`, optionally declaring the status.
    pub fn handle<E, F>(mut self, status: Option<StatusCode>, render: F) -> Self
    where
        E: StdError + Send + Sync + 'static,
        F: Fn(&E) -> Reply + Send + Sync + 'static,
    {
        self.mappings.push(Mapping {
            type_name: short_type_name::<E>(),
            status,
            render: Box::new(move |err: &anyhow::Error| find_cause::<E>(err).map(&render)),
        });
        self
    }

    /// Status for errors that match no mapping.
    pub fn fallback_status(mut self, status: StatusCode) -> Self {
        self.fallback_status = status;
        self
    }

    pub fn build(self) -> ExceptionMapper {
        ExceptionMapper {
            mappings: self.mappings,
            fallback_status: self.fallback_status,
        }
    }
}

/// First error of type `E` in the cause chain, so context-wrapped errors match.
fn find_cause<E>(err: &anyhow::Error) -> Option<&E>
where
    E: StdError + Send + Sync + 'static,
{
    err.chain().find_map(|cause| cause.downcast_ref::<E>())
}

fn short_type_name<E>() -> &'static str {
    let full = std::any::type_name::<E>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Rewrite responses that carry a [`RaisedException`].
pub async fn exception_middleware(
    State(mapper): State<Arc<ExceptionMapper>>,
    req: Request,
    next: Next,
) -> Response {
    let request_id = req
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id().to_string())
        .unwrap_or_default();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let Some(raised) = response.extensions().get::<RaisedException>().cloned() else {
        return response;
    };

    let resolution = mapper.resolve(raised.error());
    match resolution.matched {
        Some(mapping) => tracing::warn!(
            request_id = %request_id,
            path = %path,
            mapping,
            status = resolution.response.status().as_u16(),
            error = %raised.error(),
            "handler raised mapped exception"
        ),
        None => tracing::error!(
            request_id = %request_id,
            path = %path,
            status = resolution.response.status().as_u16(),
            error = ?raised.error(),
            "handler raised unmapped exception"
        ),
    }
    resolution.response
}
