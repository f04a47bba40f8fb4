//! Payment verification records

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{NewPaymentVerification, PaymentVerification};
use crate::utils::format_datetime;

use super::Database;

impl Database {
    /// Record the outcome of a payment verification attempt
    pub async fn insert_payment_verification(
        &self,
        payment: NewPaymentVerification,
    ) -> Result<PaymentVerification, DbError> {
        let now = Utc::now();

        let result = self
            .timed(
                sqlx::query(
                    r#"
                    INSERT INTO payment_verifications (tx_hash, wallet_address, user_id, verified, verified_at)
                    VALUES (?, ?, ?, ?, ?)
                    RETURNING id
                    "#,
                )
                .bind(&payment.tx_hash)
                .bind(&payment.wallet_address)
                .bind(payment.user_id)
                .bind(payment.verified)
                .bind(format_datetime(&now))
                .fetch_one(&self.pool),
            )
            .await?;

        let id: i64 = result.get("id");

        Ok(PaymentVerification {
            id,
            tx_hash: payment.tx_hash,
            wallet_address: payment.wallet_address,
            user_id: payment.user_id,
            verified: payment.verified,
            verified_at: now,
        })
    }

    /// List verification attempts recorded for a user, newest first
    pub async fn list_payment_verifications(&self, user_id: i64) -> Result<Vec<PaymentVerification>, DbError> {
        let rows = self
            .timed(
                sqlx::query(
                    r#"
                    SELECT id, tx_hash, wallet_address, user_id, verified, verified_at
                    FROM payment_verifications
                    WHERE user_id = ?
                    ORDER BY verified_at DESC, id DESC
                    "#,
                )
                .bind(user_id)
                .fetch_all(&self.pool),
            )
            .await?;

        rows.iter()
            .map(|row| PaymentVerification::try_from(row).map_err(DbError::from))
            .collect()
    }
}
