//! JWT token management

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AuthError;

/// Session lifetime used when none is configured
pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 24;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Email the user signed in with
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// JWT manager for token generation and validation
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl JwtManager {
    /// Create a new JWT manager
    pub fn new(secret: &str, token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry_hours,
        }
    }

    /// Token lifetime in seconds
    pub fn token_expiry_secs(&self) -> i64 {
        Duration::hours(self.token_expiry_hours).num_seconds()
    }

    /// Generate a JWT token for a user
    pub fn generate_token(&self, user_id: i64, email: &str) -> Result<String, AuthError> {
        self.generate_token_at(user_id, email, Utc::now().timestamp())
    }

    /// Generate a JWT token as if issued at `issued_at` (Unix timestamp)
    pub fn generate_token_at(
        &self,
        user_id: i64,
        email: &str,
        issued_at: i64,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: issued_at + self.token_expiry_secs(),
            iat: issued_at,
        };

        debug!("Generating token for user: {}", email);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenSigning(e.to_string()))
    }

    /// Validate a JWT token and return claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.validate_token_at(token, Utc::now().timestamp())
    }

    /// Validate a JWT token against the clock reading `now` (Unix timestamp)
    ///
    /// Every failure collapses to [`AuthError::InvalidToken`]. A token is
    /// usable strictly before its `exp`.
    pub fn validate_token_at(&self, token: &str, now: i64) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against `now` with no leeway
        validation.validate_exp = false;
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            debug!("Token rejected: {}", e);
            AuthError::InvalidToken
        })?;

        if token_data.claims.exp <= now {
            debug!("Token rejected: expired at {}", token_data.claims.exp);
            return Err(AuthError::InvalidToken);
        }

        Ok(token_data.claims)
    }
}
