//! Signup and login routes

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use jobboard_auth::{AuthError, hash_password, verify_dummy_password, verify_password};
use jobboard_db::{DbError, NewUser};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

use super::types::{LoginRequest, LoginResponse, MessageResponse, SignupRequest, UserSummary};

// ==================== Input Validation ====================

/// Minimum allowed password length
const MIN_PASSWORD_LENGTH: usize = 6;
/// Maximum allowed password length (bounds hashing cost)
const MAX_PASSWORD_LENGTH: usize = 256;

fn require_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }
    if password.chars().count() > MAX_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Password exceeds maximum length of {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Validate password length for new accounts
fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Run CPU-bound password work off the async workers
async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AuthError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(format!("Password task failed: {}", e)))?
        .map_err(ApiError::from)
}

// ==================== Auth Routes ====================

/// POST /api/signup
async fn signup(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    require_credentials(&request.email, &request.password)?;
    validate_password(&request.password)?;

    debug!("Signup attempt for: {}", request.email);

    let password = request.password;
    let password_hash = run_blocking(move || hash_password(&password)).await?;

    let user = match state
        .db
        .insert_user(NewUser {
            email: request.email,
            password_hash,
        })
        .await
    {
        Ok(user) => user,
        Err(DbError::Duplicate(msg)) => {
            debug!("Signup rejected: {}", msg);
            metrics::counter!("jobboard_signups_total", "outcome" => "duplicate").increment(1);
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    metrics::counter!("jobboard_signups_total", "outcome" => "created").increment(1);
    info!("Created user {} ({})", user.email, user.id);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// POST /api/login
async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    require_credentials(&request.email, &request.password)?;

    debug!("Login attempt for: {}", request.email);

    let user = state.db.get_user_by_email(&request.email).await?;
    let password = request.password;

    // Unknown email and wrong password are indistinguishable, in body and timing
    let user = match user {
        Some(user) => {
            let password_hash = user.password_hash.clone();
            let valid = run_blocking(move || verify_password(&password, &password_hash)).await?;
            valid.then_some(user)
        }
        None => {
            run_blocking(move || {
                verify_dummy_password(&password);
                Ok(())
            })
            .await?;
            None
        }
    };

    let Some(user) = user else {
        metrics::counter!("jobboard_logins_total", "outcome" => "rejected").increment(1);
        warn!("Failed login for: {}", request.email);
        return Err(AuthError::InvalidCredentials.into());
    };

    let token = state.jwt.generate_token(user.id, &user.email)?;

    metrics::counter!("jobboard_logins_total", "outcome" => "success").increment(1);
    info!("User {} logged in successfully", user.email);

    Ok(Json(LoginResponse {
        token,
        expires_in: state.jwt.token_expiry_secs(),
        user: UserSummary {
            id: user.id,
            email: user.email,
        },
    }))
}

/// Create auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{register_and_login, send, test_app};
    use axum::http::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_signup_login_and_access_profile() {
        let (app, state, _dir) = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/signup",
            None,
            Some(json!({"email": "a@x.com", "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "User created successfully");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/login",
            None,
            Some(json!({"email": "a@x.com", "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap();
        assert!(!token.is_empty());
        assert_eq!(body["user"]["email"], "a@x.com");
        assert_eq!(body["expires_in"], 24 * 3600);
        assert!(body["user"].get("password_hash").is_none());

        let claims = state.jwt.validate_token(token).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.sub, body["user"]["id"].to_string());

        let (status, body) = send(&app, Method::GET, "/api/profile", Some(token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["userId"], claims.sub.parse::<i64>().unwrap());

        let (status, _) = send(&app, Method::GET, "/api/profile", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::GET, "/api/profile", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_signup_short_password() {
        let (app, _state, _dir) = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/signup",
            None,
            Some(json!({"email": "a@x.com", "password": "ab"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Password must be at least 6 characters");
    }

    #[tokio::test]
    async fn test_signup_missing_fields() {
        let (app, _state, _dir) = test_app().await;

        for payload in [json!({}), json!({"email": "a@x.com"}), json!({"password": "secret1"})] {
            let (status, body) = send(&app, Method::POST, "/api/signup", None, Some(payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Email and password are required");
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (app, _state, _dir) = test_app().await;

        let (status, body) = send(&app, Method::POST, "/api/login", None, Some(json!("not an object"))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn test_duplicate_signup_conflicts() {
        let (app, _state, _dir) = test_app().await;
        register_and_login(&app, "a@x.com", "secret1").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/signup",
            None,
            Some(json!({"email": "a@x.com", "password": "another1"})),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Email already registered");
    }

    #[tokio::test]
    async fn test_concurrent_signups_one_wins() {
        let (app, _state, _dir) = test_app().await;
        let payload = json!({"email": "race@x.com", "password": "secret1"});

        let first = {
            let app = app.clone();
            let payload = payload.clone();
            tokio::spawn(async move { send(&app, Method::POST, "/api/signup", None, Some(payload)).await.0 })
        };
        let second = {
            let app = app.clone();
            tokio::spawn(async move { send(&app, Method::POST, "/api/signup", None, Some(payload)).await.0 })
        };

        let mut statuses = vec![first.await.unwrap().as_u16(), second.await.unwrap().as_u16()];
        statuses.sort();

        assert_eq!(statuses, vec![201, 409]);
    }

    #[tokio::test]
    async fn test_login_unknown_email_and_wrong_password_match() {
        let (app, _state, _dir) = test_app().await;
        register_and_login(&app, "a@x.com", "secret1").await;

        let (unknown_status, unknown_body) = send(
            &app,
            Method::POST,
            "/api/login",
            None,
            Some(json!({"email": "nobody@x.com", "password": "secret1"})),
        )
        .await;
        let (wrong_status, wrong_body) = send(
            &app,
            Method::POST,
            "/api/login",
            None,
            Some(json!({"email": "a@x.com", "password": "wrong-password"})),
        )
        .await;

        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_body, wrong_body);
        assert_eq!(unknown_body["error"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let (app, _state, _dir) = test_app().await;

        let (status, _) = send(&app, Method::POST, "/api/login", None, Some(json!({"email": "a@x.com"}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_password_length_rules() {
        assert!(validate_password("ab").is_err());
        assert!(validate_password("abcdef").is_ok());
        // Length counts characters, not bytes
        assert!(validate_password("ééé").is_err());
        assert!(require_credentials("a@x.com", &"x".repeat(MAX_PASSWORD_LENGTH + 1)).is_err());
        assert!(require_credentials("   ", "secret1").is_err());
    }
}
