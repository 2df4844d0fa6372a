//! Identity resolution for incoming subscription events.
//!
//! Maps a Stripe subscription back to an application user id by trying a
//! fixed sequence of sources. Each source is a strategy; the first hit wins.
//! A miss or a recoverable failure in one strategy falls through to the next,
//! and exhausting the chain yields `None` rather than an error.

use std::sync::Arc;

use async_trait::async_trait;

use crate::ports::{PaymentProvider, ProfileStore};

/// Facts about an event available to resolution strategies.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    /// User id carried in the subscription's own metadata.
    pub metadata_user_id: Option<&'a str>,
    /// The Stripe customer id owning the subscription.
    pub customer_id: Option<&'a str>,
}

/// A single source of user identity.
#[async_trait]
pub trait ResolutionStrategy: Send + Sync {
    /// Strategy name, used in logs.
    fn name(&self) -> &'static str;

    /// Try to resolve a user id. `None` means fall through to the next
    /// strategy; failures inside a strategy are logged and treated as misses.
    async fn resolve(&self, ctx: &ResolutionContext<'_>) -> Option<String>;
}

/// Reads the user id directly from the subscription's metadata.
pub struct EventMetadataStrategy;

#[async_trait]
impl ResolutionStrategy for EventMetadataStrategy {
    fn name(&self) -> &'static str {
        "event_metadata"
    }

    async fn resolve(&self, ctx: &ResolutionContext<'_>) -> Option<String> {
        ctx.metadata_user_id.map(String::from)
    }
}

/// Fetches the owning customer and reads the user id from its metadata.
pub struct CustomerMetadataStrategy {
    provider: Arc<dyn PaymentProvider>,
}

impl CustomerMetadataStrategy {
    pub fn new(provider: Arc<dyn PaymentProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ResolutionStrategy for CustomerMetadataStrategy {
    fn name(&self) -> &'static str {
        "customer_metadata"
    }

    async fn resolve(&self, ctx: &ResolutionContext<'_>) -> Option<String> {
        let customer_id = ctx.customer_id?;

        match self.provider.get_customer(customer_id).await {
            Ok(Some(customer)) => customer
                .metadata
                .get(crate::domain::USER_ID_METADATA_KEY)
                .cloned(),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(
                    customer_id,
                    error = %err,
                    "customer lookup failed during identity resolution"
                );
                None
            }
        }
    }
}

/// Looks the customer id up in the local profiles table.
pub struct ProfileLookupStrategy {
    profiles: Arc<dyn ProfileStore>,
}

impl ProfileLookupStrategy {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl ResolutionStrategy for ProfileLookupStrategy {
    fn name(&self) -> &'static str {
        "profile_lookup"
    }

    async fn resolve(&self, ctx: &ResolutionContext<'_>) -> Option<String> {
        let customer_id = ctx.customer_id?;

        match self.profiles.find_user_by_customer_id(customer_id).await {
            Ok(user_id) => user_id,
            Err(err) => {
                tracing::warn!(
                    customer_id,
                    error = %err,
                    "profile lookup failed during identity resolution"
                );
                None
            }
        }
    }
}

/// Ordered chain of resolution strategies.
pub struct IdentityResolver {
    strategies: Vec<Box<dyn ResolutionStrategy>>,
}

impl IdentityResolver {
    /// Build the standard chain: subscription metadata, then customer
    /// metadata via the provider, then the local profiles table.
    pub fn standard(provider: Arc<dyn PaymentProvider>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            strategies: vec![
                Box::new(EventMetadataStrategy),
                Box::new(CustomerMetadataStrategy::new(provider)),
                Box::new(ProfileLookupStrategy::new(profiles)),
            ],
        }
    }

    /// Build a resolver from an explicit strategy list.
    pub fn new(strategies: Vec<Box<dyn ResolutionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Run the chain in order, returning the first hit.
    pub async fn resolve(&self, ctx: &ResolutionContext<'_>) -> Option<String> {
        for strategy in &self.strategies {
            if let Some(user_id) = strategy.resolve(ctx).await {
                tracing::debug!(strategy = strategy.name(), "identity resolved");
                return Some(user_id);
            }
        }
        None
    }
}
