//! API routes

mod auth;
mod health;
mod jobs;
pub mod metrics;
mod payments;
mod profile;
pub mod types;

use axum::{Router, middleware::from_fn_with_state};
use jobboard_auth::auth_middleware;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::{AppState, MetricsHandle};

/// Routes mounted under `/api`
///
/// Everything in `protected` sits behind the bearer token gate; handlers
/// there receive the caller as an `AuthUser`.
fn api_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .merge(auth::routes())
        .merge(jobs::public_routes());

    let protected = Router::new()
        .merge(jobs::protected_routes())
        .merge(profile::routes())
        .merge(payments::routes())
        .route_layer(from_fn_with_state(state.jwt.clone(), auth_middleware));

    public.merge(protected)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

/// Create the main router
pub fn create_router(state: AppState, metrics_handle: Option<Arc<MetricsHandle>>) -> Router {
    let mut router = Router::new()
        // Health check
        .merge(health::routes())
        .nest("/api", api_routes(&state))
        .fallback(not_found)
        .with_state(state);

    // Add metrics endpoint if handle is provided
    if let Some(handle) = metrics_handle {
        router = router.merge(metrics::routes(handle));
    }

    router
}
