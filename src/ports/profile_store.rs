//! User profile persistence port.

use async_trait::async_trait;

use super::StoreError;

/// A user profile row.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: String,
    pub email: Option<String>,
    pub stripe_customer_id: Option<String>,
}

/// Outbound port for reading and updating user profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a profile by user id.
    async fn find_by_id(&self, user_id: &str) -> Result<Option<Profile>, StoreError>;

    /// Resolve a user id from a Stripe customer id.
    async fn find_user_by_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<String>, StoreError>;

    /// Record the Stripe customer id on a profile.
    async fn set_customer_id(&self, user_id: &str, customer_id: &str) -> Result<(), StoreError>;
}
