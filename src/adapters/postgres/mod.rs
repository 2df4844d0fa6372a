//! PostgreSQL persistence adapters.

mod profile_store;
mod subscription_store;

pub use profile_store::PostgresProfileStore;
pub use subscription_store::PostgresSubscriptionStore;
