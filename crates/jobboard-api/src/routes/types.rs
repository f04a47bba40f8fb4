//! Request/Response DTOs

use jobboard_db::{Job, Profile};
use serde::{Deserialize, Serialize};

// ==================== Auth Types ====================

/// Signup request
#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login request
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public part of a user's identity
#[derive(Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
}

/// Login response
#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: UserSummary,
}

/// Plain confirmation message
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ==================== Job Types ====================

/// Create job request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub salary: String,
    /// Accepted for client compatibility, payment is not enforced
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub payment_tx_hash: Option<String>,
}

/// Job response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub salary: String,
    pub posted_by: i64,
    pub created_at: String,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            description: job.description,
            skills: job.skills,
            salary: job.salary,
            posted_by: job.posted_by,
            created_at: job.created_at.to_rfc3339(),
        }
    }
}

// ==================== Profile Types ====================

/// Profile update request; every field is replaced
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default, rename = "linkedInUrl")]
    pub linkedin_url: String,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub wallet_address: String,
}

/// Profile response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub user_id: i64,
    pub name: String,
    pub bio: String,
    #[serde(rename = "linkedInUrl")]
    pub linkedin_url: String,
    pub skills: Vec<String>,
    pub wallet_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ProfileResponse {
    /// Placeholder returned for users who never saved a profile
    pub fn empty(user_id: i64) -> Self {
        Self {
            id: None,
            user_id,
            name: String::new(),
            bio: String::new(),
            linkedin_url: String::new(),
            skills: Vec::new(),
            wallet_address: String::new(),
            updated_at: None,
        }
    }
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: Some(profile.id),
            user_id: profile.user_id,
            name: profile.name,
            bio: profile.bio,
            linkedin_url: profile.linkedin_url,
            skills: profile.skills,
            wallet_address: profile.wallet_address,
            updated_at: Some(profile.updated_at.to_rfc3339()),
        }
    }
}

// ==================== Payment Types ====================

/// Payment verification request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    #[serde(default)]
    pub tx_hash: String,
    #[serde(default)]
    pub wallet_address: String,
}

/// Successful payment verification
#[derive(Serialize)]
pub struct VerifyPaymentResponse {
    pub verified: bool,
    pub message: String,
}
