//! Webhook reconciliation use case.
//!
//! Takes a raw webhook delivery, verifies it, filters it to subscription
//! lifecycle events, resolves the owning user, and upserts the canonical
//! subscription row.

use std::sync::Arc;

use crate::domain::{StripeSubscription, SubscriptionRecord, WebhookError, WebhookVerifier};
use crate::ports::SubscriptionStore;

use super::identity::{IdentityResolver, ResolutionContext};

/// Result of processing a verified webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// A lifecycle event was applied to the store.
    Applied {
        subscription_id: String,
        user_id: Option<String>,
    },
    /// The event verified but is not a subscription lifecycle event.
    Skipped { event_type: String },
}

/// Handles `POST /api/webhooks/stripe`.
pub struct ReconcileSubscriptionHandler {
    verifier: WebhookVerifier,
    resolver: IdentityResolver,
    subscriptions: Arc<dyn SubscriptionStore>,
}

impl ReconcileSubscriptionHandler {
    pub fn new(
        verifier: WebhookVerifier,
        resolver: IdentityResolver,
        subscriptions: Arc<dyn SubscriptionStore>,
    ) -> Self {
        Self {
            verifier,
            resolver,
            subscriptions,
        }
    }

    /// Verify and apply a webhook delivery.
    ///
    /// Non-lifecycle events are acknowledged without side effects. Identity
    /// resolution misses do not fail the event; the record is stored with a
    /// null user id for later reconciliation.
    ///
    /// # Errors
    ///
    /// - Signature or timestamp failures from verification
    /// - `ParseError` when a lifecycle event carries a malformed object
    /// - `Database` when the upsert fails
    pub async fn handle(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<ReconcileOutcome, WebhookError> {
        let event = self.verifier.verify_and_parse(payload, signature_header)?;

        let event_type = event.parsed_type();
        if !event_type.is_lifecycle() {
            tracing::debug!(
                event_id = %event.id,
                event_type = %event.event_type,
                "ignoring non-lifecycle event"
            );
            return Ok(ReconcileOutcome::Skipped {
                event_type: event.event_type,
            });
        }

        let subscription: StripeSubscription = event
            .deserialize_object()
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        let ctx = ResolutionContext {
            metadata_user_id: subscription.metadata_user_id(),
            customer_id: subscription.customer_id(),
        };
        let user_id = self.resolver.resolve(&ctx).await;

        if user_id.is_none() {
            tracing::warn!(
                event_id = %event.id,
                subscription_id = %subscription.id,
                "identity resolution exhausted, storing without user id"
            );
        }

        let record = SubscriptionRecord::from_event(&subscription, user_id);
        self.subscriptions.upsert(&record).await?;

        tracing::info!(
            event_id = %event.id,
            event_type = %event.event_type,
            livemode = event.livemode,
            subscription_id = %record.id,
            user_id = record.user_id.as_deref().unwrap_or("none"),
            status = %record.status,
            "subscription reconciled"
        );

        Ok(ReconcileOutcome::Applied {
            subscription_id: record.id,
            user_id: record.user_id,
        })
    }
}
