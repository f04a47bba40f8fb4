//! User operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{NewUser, User};
use crate::repository::Database;
use crate::utils::format_datetime;

impl Database {
    // ==================== User Operations ====================

    /// Insert a new user
    ///
    /// Fails with [`DbError::Duplicate`] when the email is already registered.
    /// The check relies on the UNIQUE constraint, so concurrent inserts of the
    /// same email leave exactly one row behind.
    pub async fn insert_user(&self, user: NewUser) -> Result<User, DbError> {
        let now = Utc::now();

        let result = self
            .timed(
                sqlx::query(
                    r#"
                    INSERT INTO users (email, password_hash, created_at)
                    VALUES (?, ?, ?)
                    RETURNING id
                    "#,
                )
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(format_datetime(&now))
                .fetch_one(&self.pool),
            )
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    DbError::Duplicate(format!("User '{}' already exists", user.email))
                } else {
                    e
                }
            })?;

        let id: i64 = result.get("id");

        Ok(User {
            id,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
        })
    }

    /// Get a user by email (exact, case-sensitive match)
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let result = self
            .timed(
                sqlx::query(
                    r#"
                    SELECT id, email, password_hash, created_at
                    FROM users
                    WHERE email = ?
                    "#,
                )
                .bind(email)
                .fetch_optional(&self.pool),
            )
            .await?;

        result.map(|row| User::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Get a user by ID
    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, DbError> {
        let result = self
            .timed(
                sqlx::query(
                    r#"
                    SELECT id, email, password_hash, created_at
                    FROM users
                    WHERE id = ?
                    "#,
                )
                .bind(id)
                .fetch_optional(&self.pool),
            )
            .await?;

        result.map(|row| User::try_from(&row).map_err(DbError::from)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::test_database;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup_user() {
        let (db, _dir) = test_database().await;

        let user = db.insert_user(new_user("a@x.com")).await.unwrap();
        assert!(user.id > 0);

        let by_email = db.get_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);
        assert_eq!(by_email.password_hash, "hash");

        let by_id = db.get_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_lookup_missing_user() {
        let (db, _dir) = test_database().await;
        assert!(db.get_user_by_email("nobody@x.com").await.unwrap().is_none());
        assert!(db.get_user_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let (db, _dir) = test_database().await;
        db.insert_user(new_user("a@x.com")).await.unwrap();

        assert!(db.get_user_by_email("A@X.com").await.unwrap().is_none());
        // Different case is a different account
        db.insert_user(new_user("A@X.com")).await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let (db, _dir) = test_database().await;
        db.insert_user(new_user("a@x.com")).await.unwrap();

        let err = db.insert_user(new_user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, DbError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_inserts() {
        let (db, _dir) = test_database().await;

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let db = db.clone();
                tokio::spawn(async move { db.insert_user(new_user("race@x.com")).await })
            })
            .collect();

        let mut created = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(DbError::Duplicate(_)) => duplicates += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(duplicates, 3);
    }
}
