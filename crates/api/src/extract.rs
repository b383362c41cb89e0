//! Request extractors.

use axum::{
    Json, async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::Response,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::app::errors;

/// JSON body that must deserialize and pass `validator` checks.
///
/// Any failure (wrong content type, malformed JSON, missing fields, failed
/// validation) is a 400, never a 415/422.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
        })?;

        value.validate().map_err(|e| {
            errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string())
        })?;

        Ok(Self(value))
    }
}
