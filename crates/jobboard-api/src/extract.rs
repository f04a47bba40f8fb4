//! JSON body extractor
//!
//! `ApiJson<T>` works like `axum::Json<T>`, but a body that cannot be
//! parsed is reported as a 400 with the API's `{"error": ...}` shape
//! instead of axum's plain-text rejection.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            debug!("Rejected request body: {}", rejection);
            ApiError::BadRequest("Invalid request body".to_string())
        })?;

        Ok(ApiJson(value))
    }
}
