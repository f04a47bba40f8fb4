//! Job posting operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{Job, NewJob};
use crate::utils::format_datetime;

use super::Database;

impl Database {
    /// Insert a new job posting
    pub async fn insert_job(&self, job: NewJob) -> Result<Job, DbError> {
        let now = Utc::now();
        let skills = serde_json::to_string(&job.skills)?;

        let result = self
            .timed(
                sqlx::query(
                    r#"
                    INSERT INTO jobs (title, description, skills, salary, posted_by, created_at)
                    VALUES (?, ?, ?, ?, ?, ?)
                    RETURNING id
                    "#,
                )
                .bind(&job.title)
                .bind(&job.description)
                .bind(&skills)
                .bind(&job.salary)
                .bind(job.posted_by)
                .bind(format_datetime(&now))
                .fetch_one(&self.pool),
            )
            .await?;

        let id: i64 = result.get("id");

        Ok(Job {
            id,
            title: job.title,
            description: job.description,
            skills: job.skills,
            salary: job.salary,
            posted_by: job.posted_by,
            created_at: now,
        })
    }

    /// List all jobs, newest first
    pub async fn list_jobs(&self) -> Result<Vec<Job>, DbError> {
        let rows = self
            .timed(
                sqlx::query(
                    r#"
                    SELECT id, title, description, skills, salary, posted_by, created_at
                    FROM jobs
                    ORDER BY created_at DESC, id DESC
                    "#,
                )
                .fetch_all(&self.pool),
            )
            .await?;

        rows.iter()
            .map(|row| Job::try_from(row).map_err(DbError::from))
            .collect()
    }
}
