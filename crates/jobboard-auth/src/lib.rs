//! Job Board Authentication and Authorization
//!
//! This crate provides Argon2 password hashing, stateless JWT session
//! tokens, and the Axum middleware that gates protected routes.

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use error::AuthError;
pub use jwt::{Claims, DEFAULT_TOKEN_EXPIRY_HOURS, JwtManager};
pub use middleware::{AuthUser, auth_middleware};
pub use password::{hash_password, verify_dummy_password, verify_password};
