use serde::{Deserialize, Serialize};
use validator::Validate;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct PersonRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct GreetingQuery {
    pub suffix: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

/// Error payload produced by exception handlers.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error payload that also names where the failure happened.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorWithPath {
    pub message: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WhoAmI {
    pub name: String,
    pub roles: Vec<String>,
}
