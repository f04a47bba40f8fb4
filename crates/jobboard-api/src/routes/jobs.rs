//! Job posting routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use jobboard_auth::AuthUser;
use jobboard_db::NewJob;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

use super::types::{CreateJobRequest, JobResponse};

/// GET /api/jobs
async fn list_jobs(State(state): State<AppState>) -> Result<Json<Vec<JobResponse>>, ApiError> {
    let jobs = state.db.list_jobs().await?;

    Ok(Json(jobs.into_iter().map(JobResponse::from).collect()))
}

/// POST /api/jobs
async fn create_job(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobResponse>), ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title is required".to_string()));
    }

    // TODO: require a verified payment once the on-chain check is real
    if request.payment_tx_hash.is_some() || request.wallet_address.is_some() {
        debug!("Ignoring payment details on job from user {}", user.id);
    }

    let job = state
        .db
        .insert_job(NewJob {
            title: request.title,
            description: request.description,
            skills: request.skills.unwrap_or_default(),
            salary: request.salary,
            posted_by: user.id,
        })
        .await?;

    metrics::counter!("jobboard_jobs_created_total").increment(1);
    info!("User {} posted job {}", user.email, job.id);

    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

/// Routes reachable without a token
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/jobs", get(list_jobs))
}

/// Routes that sit behind the auth gate
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/jobs", post(create_job))
}
