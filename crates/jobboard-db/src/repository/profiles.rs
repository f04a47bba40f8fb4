//! Profile operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{Profile, ProfileUpdate};
use crate::utils::format_datetime;

use super::Database;

impl Database {
    /// Get the profile belonging to a user
    pub async fn get_profile_by_user(&self, user_id: i64) -> Result<Option<Profile>, DbError> {
        let result = self
            .timed(
                sqlx::query(
                    r#"
                    SELECT id, user_id, name, bio, linkedin_url, skills, wallet_address, updated_at
                    FROM profiles
                    WHERE user_id = ?
                    "#,
                )
                .bind(user_id)
                .fetch_optional(&self.pool),
            )
            .await?;

        result.map(|row| Profile::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Create or replace the profile belonging to a user
    pub async fn upsert_profile(&self, user_id: i64, update: ProfileUpdate) -> Result<Profile, DbError> {
        let now = Utc::now();
        let skills = serde_json::to_string(&update.skills)?;

        let result = self
            .timed(
                sqlx::query(
                    r#"
                    INSERT INTO profiles (user_id, name, bio, linkedin_url, skills, wallet_address, updated_at)
                    VALUES (?, ?, ?, ?, ?, ?, ?)
                    ON CONFLICT(user_id) DO UPDATE SET
                        name = excluded.name,
                        bio = excluded.bio,
                        linkedin_url = excluded.linkedin_url,
                        skills = excluded.skills,
                        wallet_address = excluded.wallet_address,
                        updated_at = excluded.updated_at
                    RETURNING id
                    "#,
                )
                .bind(user_id)
                .bind(&update.name)
                .bind(&update.bio)
                .bind(&update.linkedin_url)
                .bind(&skills)
                .bind(&update.wallet_address)
                .bind(format_datetime(&now))
                .fetch_one(&self.pool),
            )
            .await?;

        let id: i64 = result.get("id");

        Ok(Profile {
            id,
            user_id,
            name: update.name,
            bio: update.bio,
            linkedin_url: update.linkedin_url,
            skills: update.skills,
            wallet_address: update.wallet_address,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::test_database;

    #[tokio::test]
    async fn test_missing_profile() {
        let (db, _dir) = test_database().await;
        assert!(db.get_profile_by_user(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_profile() {
        let (db, _dir) = test_database().await;

        let created = db
            .upsert_profile(
                1,
                ProfileUpdate {
                    name: "Ada".to_string(),
                    skills: vec!["rust".to_string()],
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = db
            .upsert_profile(
                1,
                ProfileUpdate {
                    name: "Ada Lovelace".to_string(),
                    bio: "Analyst".to_string(),
                    wallet_address: "0xabc".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // Same row, fields replaced wholesale
        assert_eq!(created.id, updated.id);

        let stored = db.get_profile_by_user(1).await.unwrap().unwrap();
        assert_eq!(stored.name, "Ada Lovelace");
        assert_eq!(stored.bio, "Analyst");
        assert_eq!(stored.wallet_address, "0xabc");
        assert!(stored.skills.is_empty());
    }

    #[tokio::test]
    async fn test_profiles_are_per_user() {
        let (db, _dir) = test_database().await;

        db.upsert_profile(1, ProfileUpdate { name: "One".to_string(), ..Default::default() })
            .await
            .unwrap();
        db.upsert_profile(2, ProfileUpdate { name: "Two".to_string(), ..Default::default() })
            .await
            .unwrap();

        assert_eq!(db.get_profile_by_user(1).await.unwrap().unwrap().name, "One");
        assert_eq!(db.get_profile_by_user(2).await.unwrap().unwrap().name, "Two");
    }
}
