//! Port traits decoupling the application core from infrastructure.
//!
//! Adapters (Stripe API client, PostgreSQL repositories) implement these
//! traits; application handlers depend only on the trait objects.

pub mod payment_provider;
pub mod profile_store;
pub mod subscription_store;

pub use payment_provider::{
    CheckoutSession, CreateCheckoutRequest, CreateCustomerRequest, Customer, PaymentError,
    PaymentProvider,
};
pub use profile_store::{Profile, ProfileStore};
pub use subscription_store::SubscriptionStore;

use thiserror::Error;

/// Errors surfaced by persistence ports.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
}
