//! Database repository implementation

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::info;

use crate::error::DbError;

// Submodules
mod jobs;
mod payments;
mod profiles;
mod users;

/// Connection pool tuning
#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    pub max_connections: u32,
    /// Upper bound for a single store operation, including pool acquisition
    pub query_timeout: Duration,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            max_connections: 10,
            query_timeout: Duration::from_secs(10),
        }
    }
}

/// Database connection and operations
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    query_timeout: Duration,
}

impl Database {
    /// Create a new database connection with default options
    pub async fn new(database_url: &str) -> Result<Self, DbError> {
        Self::connect(database_url, DatabaseOptions::default()).await
    }

    /// Create a new database connection
    pub async fn connect(database_url: &str, options: DatabaseOptions) -> Result<Self, DbError> {
        info!("Connecting to database: {}", database_url);

        let connect_options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .acquire_timeout(options.query_timeout)
            .connect_with(connect_options)
            .await?;

        let db = Self {
            pool,
            query_timeout: options.query_timeout,
        };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Run a store operation bounded by the configured timeout
    pub(crate) async fn timed<T, F>(&self, operation: F) -> Result<T, DbError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, operation).await {
            Ok(result) => result.map_err(DbError::from),
            Err(_) => Err(DbError::Timeout(self.query_timeout)),
        }
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<(), DbError> {
        info!("Running database migrations");

        // Email uniqueness is enforced here, not by a lookup before insert
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                skills TEXT NOT NULL DEFAULT '[]',
                salary TEXT NOT NULL,
                posted_by INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_jobs_created_at ON jobs(created_at)
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL UNIQUE,
                name TEXT NOT NULL,
                bio TEXT NOT NULL,
                linkedin_url TEXT NOT NULL,
                skills TEXT NOT NULL DEFAULT '[]',
                wallet_address TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS payment_verifications (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tx_hash TEXT NOT NULL,
                wallet_address TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                verified INTEGER NOT NULL,
                verified_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_payment_verifications_user_tx ON payment_verifications(user_id, tx_hash)
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Database migrations completed");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use tempfile::TempDir;

    /// Open a fresh file-backed database; keep the TempDir alive for the test
    pub(crate) async fn test_database() -> (Database, TempDir) {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}", dir.path().join("test.db").display());
        let db = Database::new(&url).await.unwrap();
        (db, dir)
    }
}
