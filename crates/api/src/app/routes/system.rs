use axum::{
    Extension, Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn hello() -> &'static str {
    "hello"
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> impl IntoResponse {
    let principal = principal.principal();
    Json(dto::WhoAmI {
        name: principal.name().to_string(),
        roles: principal.roles().map(|r| r.as_str().to_string()).collect(),
    })
}

pub async fn not_found(uri: Uri) -> Response {
    errors::json_error(
        StatusCode::NOT_FOUND,
        "not_found",
        format!("no route for {}", uri.path()),
    )
}
