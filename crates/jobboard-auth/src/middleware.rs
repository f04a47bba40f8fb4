//! Authentication middleware for Axum

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::AuthError;
use crate::jwt::{Claims, JwtManager};

/// Authenticated user information
///
/// Placed in the request extensions by [`auth_middleware`] and handed to
/// handlers through its [`FromRequestParts`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
}

impl AuthUser {
    /// Create from JWT claims
    pub fn from_claims(claims: &Claims) -> Result<Self, AuthError> {
        let id = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;

        Ok(Self {
            id,
            email: claims.email.clone(),
        })
    }
}

/// Extract bearer token from authorization header
fn extract_bearer_token(header: &str) -> Result<&str, AuthError> {
    header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidAuthHeader)
}

/// Authenticate a raw `Authorization` header value
fn authenticate(jwt_manager: &JwtManager, header: Option<&str>) -> Result<AuthUser, AuthError> {
    let header = header.ok_or(AuthError::MissingAuthHeader)?;
    let token = extract_bearer_token(header)?;
    let claims = jwt_manager.validate_token(token)?;
    AuthUser::from_claims(&claims)
}

/// Authentication middleware
///
/// Rejects the request with 401 unless the Authorization header carries a
/// valid bearer token. On success the [`AuthUser`] is added to the request
/// extensions and the inner handler runs.
pub async fn auth_middleware(
    State(jwt_manager): State<Arc<JwtManager>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let user = authenticate(&jwt_manager, auth_header).inspect_err(|e| {
        warn!("Rejected {} {}: {}", request.method(), request.uri().path(), e);
    })?;

    debug!("Authenticated user: {} ({})", user.email, user.id);

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present when the route sits behind auth_middleware
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AuthError::MissingAuthHeader)
    }
}
