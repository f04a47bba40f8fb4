//! Configuration loading and management

use anyhow::{Context, Result, bail};
use jobboard_auth::DEFAULT_TOKEN_EXPIRY_HOURS;
use jobboard_db::DatabaseOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Secrets shorter than this are accepted but logged as weak
const MIN_RECOMMENDED_SECRET_BYTES: usize = 32;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_db_url(),
            max_connections: default_max_connections(),
            query_timeout_secs: default_query_timeout_secs(),
        }
    }
}

impl DatabaseConfig {
    pub fn options(&self) -> DatabaseOptions {
        DatabaseOptions {
            max_connections: self.max_connections,
            query_timeout: Duration::from_secs(self.query_timeout_secs),
        }
    }

    /// Path of the SQLite file behind the URL, if it names one
    pub fn sqlite_file_path(&self) -> Option<PathBuf> {
        let rest = self
            .url
            .strip_prefix("sqlite://")
            .or_else(|| self.url.strip_prefix("sqlite:"))?;
        let path = rest.split('?').next().unwrap_or_default();

        if path.is_empty() || path == ":memory:" {
            return None;
        }
        Some(PathBuf::from(path))
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC signing secret; startup fails without one
    #[serde(default)]
    pub jwt_secret: Option<String>,
    #[serde(default = "default_token_expiry_hours")]
    pub token_expiry_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_expiry_hours: default_token_expiry_hours(),
        }
    }
}

/// Cross-origin configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: default_allowed_origin(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Default value functions
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_db_url() -> String {
    "sqlite://./data/jobboard.db".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_query_timeout_secs() -> u64 {
    10
}

fn default_token_expiry_hours() -> i64 {
    DEFAULT_TOKEN_EXPIRY_HOURS
}

fn default_allowed_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &str) -> Result<Self> {
        let config_path = Path::new(path);

        // Check if config file exists
        if !config_path.exists() {
            info!("Config file not found at {}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        info!("Loaded configuration from {}", path);
        Ok(config)
    }

    /// The token signing secret
    ///
    /// Fails when none is configured; the server must not start without one.
    pub fn jwt_secret(&self) -> Result<&str> {
        let Some(secret) = self.configured_secret() else {
            bail!("JWT secret is not configured; set JWT_SECRET or [auth].jwt_secret");
        };

        if secret.len() < MIN_RECOMMENDED_SECRET_BYTES {
            warn!(
                "JWT secret is shorter than {} bytes; use a longer random value",
                MIN_RECOMMENDED_SECRET_BYTES
            );
        }

        Ok(secret)
    }

    fn configured_secret(&self) -> Option<&str> {
        self.auth
            .jwt_secret
            .as_deref()
            .filter(|secret| !secret.trim().is_empty())
    }

    /// Check values that would otherwise fail at first use
    pub fn validate(&self) -> Result<()> {
        if self.configured_secret().is_none() {
            bail!("JWT secret is not configured; set JWT_SECRET or [auth].jwt_secret");
        }

        if self.auth.token_expiry_hours <= 0 {
            bail!(
                "auth.token_expiry_hours must be positive, got {}",
                self.auth.token_expiry_hours
            );
        }
        if self.database.max_connections == 0 {
            bail!("database.max_connections must be at least 1");
        }
        if self.database.query_timeout_secs == 0 {
            bail!("database.query_timeout_secs must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "sqlite://./data/jobboard.db");
        assert_eq!(config.database.query_timeout_secs, 10);
        assert_eq!(config.auth.token_expiry_hours, 24);
        assert_eq!(config.cors.allowed_origin, "http://localhost:3000");
        assert_eq!(config.logging.level, "info");
        assert!(config.auth.jwt_secret.is_none());
    }

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
            [server]
            bind_address = "127.0.0.1"
            port = 9000

            [database]
            url = "sqlite:///var/lib/jobboard/app.db?mode=rwc"
            max_connections = 4
            query_timeout_secs = 3

            [auth]
            jwt_secret = "0123456789abcdef0123456789abcdef"
            token_expiry_hours = 12

            [cors]
            allowed_origin = "https://jobs.example.com"

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.options().max_connections, 4);
        assert_eq!(config.database.options().query_timeout, Duration::from_secs(3));
        assert_eq!(config.jwt_secret().unwrap(), "0123456789abcdef0123456789abcdef");
        assert_eq!(config.auth.token_expiry_hours, 12);
        assert_eq!(config.cors.allowed_origin, "https://jobs.example.com");
        assert_eq!(config.logging.format, "json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let config = Config::default();
        assert!(config.jwt_secret().is_err());
        assert!(config.validate().is_err());

        let blank: Config = toml::from_str("[auth]\njwt_secret = \"   \"").unwrap();
        assert!(blank.jwt_secret().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.auth.jwt_secret = Some("0123456789abcdef0123456789abcdef".to_string());
        assert!(config.validate().is_ok());

        config.auth.token_expiry_hours = 0;
        assert!(config.validate().is_err());

        config.auth.token_expiry_hours = 24;
        config.database.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sqlite_file_path() {
        let mut db = DatabaseConfig::default();
        assert_eq!(db.sqlite_file_path(), Some(PathBuf::from("./data/jobboard.db")));

        db.url = "sqlite:app.db?mode=rwc".to_string();
        assert_eq!(db.sqlite_file_path(), Some(PathBuf::from("app.db")));

        db.url = "sqlite::memory:".to_string();
        assert_eq!(db.sqlite_file_path(), None);

        db.url = "postgres://localhost/jobs".to_string();
        assert_eq!(db.sqlite_file_path(), None);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load("/nonexistent/jobboard.toml").unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 7000").unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 7000);
    }

    #[test]
    fn test_load_invalid_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();

        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }
}
