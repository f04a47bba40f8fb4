//! Payment verification route
//!
//! The on-chain lookup is not implemented: a transaction hash is accepted
//! when it is formatted like an Ethereum hash. Every attempt is recorded.

use axum::{Json, Router, extract::State, routing::post};
use jobboard_auth::AuthUser;
use jobboard_db::NewPaymentVerification;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

use super::types::{VerifyPaymentRequest, VerifyPaymentResponse};

/// `0x` followed by 32 bytes of hex
const TX_HASH_LENGTH: usize = 66;

/// Format-only transaction check
fn looks_like_tx_hash(tx_hash: &str) -> bool {
    tx_hash.len() == TX_HASH_LENGTH
        && tx_hash
            .strip_prefix("0x")
            .is_some_and(|digits| hex::decode(digits).is_ok())
}

/// POST /api/verify-payment
async fn verify_payment(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>, ApiError> {
    if request.tx_hash.is_empty() || request.wallet_address.is_empty() {
        return Err(ApiError::BadRequest(
            "Transaction hash and wallet address are required".to_string(),
        ));
    }

    let verified = looks_like_tx_hash(&request.tx_hash);

    state
        .db
        .insert_payment_verification(NewPaymentVerification {
            tx_hash: request.tx_hash,
            wallet_address: request.wallet_address,
            user_id: user.id,
            verified,
        })
        .await?;

    metrics::counter!(
        "jobboard_payment_verifications_total",
        "verified" => verified.to_string()
    )
    .increment(1);

    if !verified {
        warn!("Payment verification failed for user {}", user.id);
        return Err(ApiError::BadRequest(
            "Transaction verification failed".to_string(),
        ));
    }

    info!("Payment verified for user {}", user.id);

    Ok(Json(VerifyPaymentResponse {
        verified: true,
        message: "Payment verified".to_string(),
    }))
}

/// Create payment routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/verify-payment", post(verify_payment))
}
