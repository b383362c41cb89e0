//! Endpoints under `/exception` that always fail, and the table mapping their
//! errors to responses.

use axum::{
    Router,
    http::{HeaderName, HeaderValue, StatusCode},
    routing::get,
};
use thiserror::Error;

use crate::app::dto::{ErrorMessage, ErrorWithPath};
use crate::exception::{ExceptionMapper, Raised, Reply, ResponseEntity};

/// Carries its own status (500) and message.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct FirstResponseStatus(pub String);

/// Carries its own status (503); no handler, so no body.
#[derive(Debug, Error)]
#[error("second")]
pub struct SecondResponseStatus;

#[derive(Debug, Error)]
#[error("illegal state")]
pub struct IllegalState;

/// Mapped by a handler that declares neither status nor body.
#[derive(Debug, Error)]
#[error("unannotated")]
pub struct Unannotated;

#[derive(Debug, Error)]
#[error("bad state at {path}")]
pub struct BadState {
    pub path: String,
}

#[derive(Debug, Error)]
#[error("pojo")]
pub struct PojoError;

#[derive(Debug, Error)]
#[error("illegal argument")]
pub struct IllegalArgument;

pub fn router() -> Router {
    Router::new()
        .route("/first", get(first))
        .route("/second", get(second))
        .route("/void", get(void))
        .route("/unannotated", get(unannotated))
        .route("/responseEntity", get(response_entity))
        .route(
            "/responseEntityFromVoidReturningMethod",
            get(response_entity_from_void_returning_method),
        )
        .route("/pojo", get(pojo))
        .route("/pojoWithVoidReturnType", get(pojo_with_void_return_type))
        .route("/re", get(re))
}

/// Declared mapping table for the errors above.
pub fn exception_mapper() -> ExceptionMapper {
    ExceptionMapper::builder()
        .handle::<FirstResponseStatus, _>(Some(StatusCode::INTERNAL_SERVER_ERROR), |e| {
            Reply::Text(e.0.clone())
        })
        .status::<SecondResponseStatus>(StatusCode::SERVICE_UNAVAILABLE)
        .handle::<IllegalState, _>(Some(StatusCode::BAD_REQUEST), |_| Reply::Empty)
        .handle::<Unannotated, _>(None, |_| Reply::Empty)
        .handle::<BadState, _>(None, |e| {
            Reply::Entity(
                ResponseEntity::new(StatusCode::PAYMENT_REQUIRED)
                    .header(
                        HeaderName::from_static("custom-header"),
                        HeaderValue::from_static("custom-value"),
                    )
                    .json(&ErrorWithPath {
                        message: "bad state".to_string(),
                        path: e.path.clone(),
                    }),
            )
        })
        .handle::<PojoError, _>(Some(StatusCode::EXPECTATION_FAILED), |_| {
            Reply::json(&ErrorMessage::new("hello from error"))
        })
        .handle::<IllegalArgument, _>(None, |_| {
            Reply::Entity(
                ResponseEntity::new(StatusCode::PAYMENT_REQUIRED)
                    .json(&ErrorMessage::new("hello from error")),
            )
        })
        .build()
}

pub async fn first() -> Result<String, Raised> {
    Err(FirstResponseStatus("first".to_string()).into())
}

pub async fn second() -> Result<String, Raised> {
    Err(SecondResponseStatus.into())
}

pub async fn void() -> Result<(), Raised> {
    Err(IllegalState.into())
}

pub async fn unannotated() -> Result<(), Raised> {
    Err(Unannotated.into())
}

pub async fn response_entity() -> Result<String, Raised> {
    Err(BadState {
        path: "responseEntity".to_string(),
    }
    .into())
}

pub async fn response_entity_from_void_returning_method() -> Result<(), Raised> {
    Err(BadState {
        path: "responseEntity".to_string(),
    }
    .into())
}

pub async fn pojo() -> Result<String, Raised> {
    Err(PojoError.into())
}

pub async fn pojo_with_void_return_type() -> Result<(), Raised> {
    Err(PojoError.into())
}

pub async fn re() -> Result<ResponseEntity, Raised> {
    Err(IllegalArgument.into())
}
