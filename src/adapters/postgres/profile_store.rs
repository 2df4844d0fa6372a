//! PostgreSQL profile store.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::ports::{Profile, ProfileStore, StoreError};

/// Profile store backed by the `profiles` table.
pub struct PostgresProfileStore {
    pool: PgPool,
}

impl PostgresProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PostgresProfileStore {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        let row = sqlx::query(
            "SELECT id, email, stripe_customer_id FROM profiles WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(row.map(|row| Profile {
            id: row.get("id"),
            email: row.get("email"),
            stripe_customer_id: row.get("stripe_customer_id"),
        }))
    }

    async fn find_user_by_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT id FROM profiles WHERE stripe_customer_id = $1")
            .bind(customer_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(row.map(|row| row.get("id")))
    }

    async fn set_customer_id(&self, user_id: &str, customer_id: &str) -> Result<(), StoreError> {
        sqlx::query("UPDATE profiles SET stripe_customer_id = $2 WHERE id = $1")
            .bind(user_id)
            .bind(customer_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(user_id, error = %e, "profile customer id update failed");
                StoreError::Database(e.to_string())
            })?;

        Ok(())
    }
}
