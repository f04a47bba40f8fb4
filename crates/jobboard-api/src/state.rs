//! Application state

use jobboard_auth::JwtManager;
use jobboard_db::Database;
use std::sync::Arc;

/// Handle used to render collected metrics
pub type MetricsHandle = metrics_exporter_prometheus::PrometheusHandle;

/// Application state shared across handlers
///
/// Built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<JwtManager>,
}

impl AppState {
    pub fn new(db: Database, jwt: Arc<JwtManager>) -> Self {
        Self { db, jwt }
    }
}
