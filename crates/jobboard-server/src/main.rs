//! Job Board - REST backend for job postings and candidate profiles

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method, header};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;

use config::{Config, LoggingConfig};
use jobboard_api::{AppState, create_router};
use jobboard_auth::JwtManager;
use jobboard_db::Database;

/// Job Board - REST backend for job postings and candidate profiles
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Bind address
    #[arg(long, env = "JOBBOARD_BIND")]
    bind: Option<String>,

    /// Port
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Database URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Token signing secret
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,

    /// Allowed cross-origin caller
    #[arg(long, env = "CORS_ORIGIN")]
    cors_origin: Option<String>,
}

impl Args {
    /// Command line and environment values win over the config file
    fn apply_to(self, config: &mut Config) {
        if let Some(bind) = self.bind {
            config.server.bind_address = bind;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = self.database_url {
            config.database.url = url;
        }
        if let Some(secret) = self.jwt_secret {
            config.auth.jwt_secret = Some(secret);
        }
        if let Some(origin) = self.cors_origin {
            config.cors.allowed_origin = origin;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Values from .env feed the env fallbacks below; a missing file is fine
    dotenv::dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;
    args.apply_to(&mut config);

    // Initialize logging
    init_logging(&config.logging);

    info!("Starting Job Board v{}", env!("CARGO_PKG_VERSION"));

    config.validate()?;

    // Create data directory for file-backed SQLite
    if let Some(parent) = config
        .database
        .sqlite_file_path()
        .and_then(|path| path.parent().map(|p| p.to_path_buf()))
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        tokio::fs::create_dir_all(&parent)
            .await
            .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
    }

    // Initialize database
    let db = Database::connect(&config.database.url, config.database.options())
        .await
        .context("Failed to initialize database")?;

    // Initialize JWT manager
    let jwt = Arc::new(JwtManager::new(
        config.jwt_secret()?,
        config.auth.token_expiry_hours,
    ));

    // Install metrics recorder
    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install metrics recorder")?;

    // Create application state
    let state = AppState::new(db, jwt);

    // Create router
    let app = create_router(state, Some(Arc::new(metrics_handle)))
        .layer(cors_layer(&config.cors.allowed_origin)?)
        .layer(TraceLayer::new_for_http());

    // Determine bind address
    let addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.port)
        .parse()
        .context("Invalid bind address")?;

    info!("Listening on {}", addr);
    info!("Allowed origin: {}", config.cors.allowed_origin);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Initialize logging
fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format.eq_ignore_ascii_case("json") {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Cross-origin policy for the single configured browser origin
fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin: HeaderValue = origin
        .parse()
        .with_context(|| format!("Invalid CORS origin: {}", origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a handler the server runs until killed
        error!("Failed to install CTRL+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
