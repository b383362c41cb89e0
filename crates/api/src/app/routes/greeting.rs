use axum::{
    Json, Router,
    extract::{Path, Query},
    response::Response,
    routing::{get, post},
};

use routegate_core::{Greeting, PersonName};

use crate::app::{dto, errors};
use crate::exception::ResponseEntity;
use crate::extract::ValidatedJson;

pub fn router() -> Router {
    Router::new()
        .route("/json/:name", get(greet_json))
        .route("/re/json/:name", get(greet_entity))
        .route("/person", post(greet_person))
}

/// GET /greeting/json/:name?suffix=...
pub async fn greet_json(
    Path(name): Path<String>,
    Query(query): Query<dto::GreetingQuery>,
) -> Json<Greeting> {
    Json(Greeting::echo(&name, query.suffix.as_deref()))
}

/// GET /greeting/re/json/:name: same payload wrapped in an explicit entity.
pub async fn greet_entity(Path(name): Path<String>) -> ResponseEntity {
    ResponseEntity::ok().json(&Greeting::echo(&name, None))
}

/// POST /greeting/person
pub async fn greet_person(
    ValidatedJson(body): ValidatedJson<dto::PersonRequest>,
) -> Result<Json<Greeting>, Response> {
    let name = PersonName::parse(body.name).map_err(errors::domain_error_to_response)?;
    Ok(Json(Greeting::hello(&name)))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{self, StatusCode, header},
    };
    use tower::ServiceExt;

    use super::*;

    async fn call(req: http::Request<Body>) -> (StatusCode, String) {
        let res = router().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn person(body: &str) -> http::Request<Body> {
        http::Request::builder()
            .method("POST")
            .uri("/person")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn suffix_is_optional() {
        let req = http::Request::builder().uri("/json/hi").body(Body::empty()).unwrap();
        assert_eq!(call(req).await, (StatusCode::OK, r#"{"message":"hi"}"#.to_string()));
    }

    #[tokio::test]
    async fn whitespace_only_name_is_rejected() {
        let (status, _) = call(person(r#"{"name":"   "}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn person_greeting_says_hello() {
        let (status, body) = call(person(r#"{"name":"Ann"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("hello Ann"));
    }
}
