//! Password hashing with Argon2id

use std::sync::LazyLock;

use argon2::Argon2;
use argon2::password_hash::{
    Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    rand_core::OsRng,
};

use crate::error::AuthError;

/// Hash verified when a login names an unknown account
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("timing-attack-prevention").unwrap_or_default());

/// Hash a password with a fresh random salt
///
/// The salt and parameters are embedded in the returned PHC string.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Verify a password against a stored hash
///
/// A mismatch is `Ok(false)`; only a malformed hash is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::PasswordHash(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(e) => Err(AuthError::PasswordHash(e.to_string())),
    }
}

/// Spend the same work as a real verification, discarding the result
pub fn verify_dummy_password(password: &str) {
    let _ = verify_password(password, &DUMMY_HASH);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("secret1").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("secret1", &hash).unwrap());
        assert!(!verify_password("secret2", &hash).unwrap());
        assert!(!verify_password("", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("secret1").unwrap();
        let second = hash_password("secret1").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("secret1", &first).unwrap());
        assert!(verify_password("secret1", &second).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        let result = verify_password("secret1", "not-a-phc-string");
        assert!(matches!(result, Err(AuthError::PasswordHash(_))));
    }

    #[test]
    fn test_dummy_hash_is_usable() {
        assert!(!DUMMY_HASH.is_empty());
        assert!(!verify_password("secret1", &DUMMY_HASH).unwrap());
        verify_dummy_password("secret1");
    }
}
