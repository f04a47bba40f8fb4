//! Database models

use crate::utils::parse_datetime_or_now;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;

/// User model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// New user (for insertion)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

/// Job posting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub salary: String,
    /// ID of the user who posted the job
    pub posted_by: i64,
    pub created_at: DateTime<Utc>,
}

/// New job posting (for insertion)
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub salary: String,
    pub posted_by: i64,
}

/// User profile, at most one per user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub bio: String,
    pub linkedin_url: String,
    pub skills: Vec<String>,
    pub wallet_address: String,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields replaced on upsert
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: String,
    pub bio: String,
    pub linkedin_url: String,
    pub skills: Vec<String>,
    pub wallet_address: String,
}

/// Recorded payment verification attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentVerification {
    pub id: i64,
    pub tx_hash: String,
    pub wallet_address: String,
    pub user_id: i64,
    pub verified: bool,
    pub verified_at: DateTime<Utc>,
}

/// New payment verification (for insertion)
#[derive(Debug, Clone)]
pub struct NewPaymentVerification {
    pub tx_hash: String,
    pub wallet_address: String,
    pub user_id: i64,
    pub verified: bool,
}

/// Decode a JSON-encoded string list column
fn decode_string_list(row: &sqlx::sqlite::SqliteRow, column: &str) -> Result<Vec<String>, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    serde_json::from_str(&raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

// ==================== TryFrom Implementations ====================

impl TryFrom<&sqlx::sqlite::SqliteRow> for User {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            created_at: parse_datetime_or_now(&row.try_get::<String, _>("created_at")?),
        })
    }
}

impl TryFrom<&sqlx::sqlite::SqliteRow> for Job {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        Ok(Job {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            skills: decode_string_list(row, "skills")?,
            salary: row.try_get("salary")?,
            posted_by: row.try_get("posted_by")?,
            created_at: parse_datetime_or_now(&row.try_get::<String, _>("created_at")?),
        })
    }
}

impl TryFrom<&sqlx::sqlite::SqliteRow> for Profile {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        Ok(Profile {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            name: row.try_get("name")?,
            bio: row.try_get("bio")?,
            linkedin_url: row.try_get("linkedin_url")?,
            skills: decode_string_list(row, "skills")?,
            wallet_address: row.try_get("wallet_address")?,
            updated_at: parse_datetime_or_now(&row.try_get::<String, _>("updated_at")?),
        })
    }
}

impl TryFrom<&sqlx::sqlite::SqliteRow> for PaymentVerification {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        Ok(PaymentVerification {
            id: row.try_get("id")?,
            tx_hash: row.try_get("tx_hash")?,
            wallet_address: row.try_get("wallet_address")?,
            user_id: row.try_get("user_id")?,
            verified: row.try_get("verified")?,
            verified_at: parse_datetime_or_now(&row.try_get::<String, _>("verified_at")?),
        })
    }
}
