//! Authentication error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Any verification failure, expiry included
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Missing authorization header")]
    MissingAuthHeader,

    #[error("Invalid authorization header format")]
    InvalidAuthHeader,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token signing error: {0}")]
    TokenSigning(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader => StatusCode::UNAUTHORIZED,
            AuthError::PasswordHash(_) | AuthError::TokenSigning(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to return to the client
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Invalid email or password",
            AuthError::InvalidToken => "Invalid or expired token",
            AuthError::MissingAuthHeader | AuthError::InvalidAuthHeader => {
                "Missing or invalid Authorization header"
            }
            AuthError::PasswordHash(_) | AuthError::TokenSigning(_) => "Internal server error",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if self.status().is_server_error() {
            tracing::error!("Authentication failure: {}", self);
        }

        let body = axum::Json(json!({
            "error": self.public_message()
        }));

        (self.status(), body).into_response()
    }
}
