//! Checkout initiation use case.
//!
//! Ensures the user has a Stripe customer with the application user id in
//! its metadata, then creates a hosted checkout session for the configured
//! price.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::USER_ID_METADATA_KEY;
use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, CreateCustomerRequest, PaymentError, PaymentProvider,
    ProfileStore, StoreError,
};

/// Errors from checkout initiation.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("no profile for user")]
    ProfileNotFound,

    #[error("no checkout price configured")]
    PriceNotConfigured,

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Handles `POST /api/checkout`.
pub struct StartCheckoutHandler {
    provider: Arc<dyn PaymentProvider>,
    profiles: Arc<dyn ProfileStore>,
    price_id: Option<String>,
    success_url: String,
    cancel_url: String,
}

impl StartCheckoutHandler {
    pub fn new(
        provider: Arc<dyn PaymentProvider>,
        profiles: Arc<dyn ProfileStore>,
        price_id: Option<String>,
        success_url: String,
        cancel_url: String,
    ) -> Self {
        Self {
            provider,
            profiles,
            price_id,
            success_url,
            cancel_url,
        }
    }

    /// Start a checkout session for the given user.
    ///
    /// Reuses the profile's Stripe customer when one exists, backfilling the
    /// user id into its metadata if missing. Otherwise creates a fresh
    /// customer and records its id on the profile.
    pub async fn handle(&self, user_id: &str) -> Result<CheckoutSession, CheckoutError> {
        let price_id = self
            .price_id
            .as_deref()
            .ok_or(CheckoutError::PriceNotConfigured)?;

        let profile = self
            .profiles
            .find_by_id(user_id)
            .await?
            .ok_or(CheckoutError::ProfileNotFound)?;

        let customer_id = self.ensure_customer(user_id, &profile).await?;

        let session = self
            .provider
            .create_checkout_session(CreateCheckoutRequest {
                customer_id: customer_id.clone(),
                price_id: price_id.to_string(),
                success_url: self.success_url.clone(),
                cancel_url: self.cancel_url.clone(),
            })
            .await?;

        tracing::info!(user_id, %customer_id, session_id = %session.id, "checkout session created");

        Ok(session)
    }

    /// Return a usable Stripe customer id for the profile, creating or
    /// repairing state as needed.
    async fn ensure_customer(
        &self,
        user_id: &str,
        profile: &crate::ports::Profile,
    ) -> Result<String, CheckoutError> {
        if let Some(customer_id) = &profile.stripe_customer_id {
            // Known customer: make sure its metadata still points back at us.
            if let Some(customer) = self.provider.get_customer(customer_id).await? {
                if !customer.metadata.contains_key(USER_ID_METADATA_KEY) {
                    let mut metadata = HashMap::new();
                    metadata.insert(USER_ID_METADATA_KEY.to_string(), user_id.to_string());
                    self.provider
                        .update_customer_metadata(customer_id, metadata)
                        .await?;
                    tracing::debug!(user_id, %customer_id, "backfilled customer metadata");
                }
                return Ok(customer_id.clone());
            }
            // Stale reference (customer deleted upstream), fall through and
            // create a replacement.
            tracing::warn!(user_id, %customer_id, "profile references missing customer");
        }

        let customer = self
            .provider
            .create_customer(CreateCustomerRequest {
                email: profile.email.clone(),
                user_id: user_id.to_string(),
            })
            .await?;

        self.profiles.set_customer_id(user_id, &customer.id).await?;

        Ok(customer.id)
    }
}
