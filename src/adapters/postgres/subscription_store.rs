//! PostgreSQL subscription store.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::SubscriptionRecord;
use crate::ports::{StoreError, SubscriptionStore};

/// Subscription store backed by the `subscriptions` table.
pub struct PostgresSubscriptionStore {
    pool: PgPool,
}

impl PostgresSubscriptionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionStore for PostgresSubscriptionStore {
    async fn upsert(&self, record: &SubscriptionRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                id, user_id, status, price_id,
                current_period_start, current_period_end,
                cancel_at_period_end, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, now())
            ON CONFLICT (id) DO UPDATE SET
                user_id = EXCLUDED.user_id,
                status = EXCLUDED.status,
                price_id = EXCLUDED.price_id,
                current_period_start = EXCLUDED.current_period_start,
                current_period_end = EXCLUDED.current_period_end,
                cancel_at_period_end = EXCLUDED.cancel_at_period_end,
                updated_at = now()
            "#,
        )
        .bind(&record.id)
        .bind(&record.user_id)
        .bind(&record.status)
        .bind(&record.price_id)
        .bind(record.current_period_start)
        .bind(record.current_period_end)
        .bind(record.cancel_at_period_end)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(subscription_id = %record.id, error = %e, "subscription upsert failed");
            StoreError::Database(e.to_string())
        })?;

        Ok(())
    }
}
