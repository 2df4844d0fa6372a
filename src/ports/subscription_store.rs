//! Subscription persistence port.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::SubscriptionRecord;

/// Outbound port for persisting subscription records.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Insert or fully replace the record keyed by its subscription id.
    ///
    /// The operation must be idempotent: applying the same record twice
    /// leaves the same row.
    async fn upsert(&self, record: &SubscriptionRecord) -> Result<(), StoreError>;
}
