//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] jobboard_db::DbError),

    #[error("Auth error: {0}")]
    Auth(#[from] jobboard_auth::AuthError),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            ApiError::Database(e) => match e {
                jobboard_db::DbError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
                jobboard_db::DbError::Duplicate(_) => {
                    (StatusCode::CONFLICT, "Resource already exists".to_string())
                }
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                ),
            },
            ApiError::Auth(e) => (e.status(), e.public_message().to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        // Details stay in the log, the client only sees the public message
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = axum::Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
