//! Profile routes

use axum::{Json, Router, extract::State, routing::get};
use jobboard_auth::AuthUser;
use jobboard_db::ProfileUpdate;
use tracing::info;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

use super::types::{MessageResponse, ProfileResponse, ProfileUpdateRequest};

/// GET /api/profile
async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state.db.get_profile_by_user(user.id).await?;

    Ok(Json(
        profile
            .map(ProfileResponse::from)
            .unwrap_or_else(|| ProfileResponse::empty(user.id)),
    ))
}

/// PUT|POST /api/profile
async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<ProfileUpdateRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .db
        .upsert_profile(
            user.id,
            ProfileUpdate {
                name: request.name,
                bio: request.bio,
                linkedin_url: request.linkedin_url,
                skills: request.skills.unwrap_or_default(),
                wallet_address: request.wallet_address,
            },
        )
        .await?;

    info!("Updated profile for user {}", user.email);

    Ok(Json(MessageResponse::new("Profile updated")))
}

/// Create profile routes
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/profile",
        get(get_profile).put(update_profile).post(update_profile),
    )
}
