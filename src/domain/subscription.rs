//! Canonical subscription record derived from webhook events.

use chrono::{DateTime, Utc};

use super::stripe_event::StripeSubscription;
use super::timestamp::normalize_epoch;

/// The row shape persisted for each subscription.
///
/// Every field is derived defensively from the raw event object: absent or
/// malformed data degrades to `None` (or `false`) rather than failing the
/// whole event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord {
    /// Stripe subscription id, the primary key.
    pub id: String,

    /// Resolved application user id, if identity resolution succeeded.
    pub user_id: Option<String>,

    /// Subscription status verbatim from Stripe.
    pub status: String,

    /// Price id of the first line item.
    pub price_id: Option<String>,

    /// Start of the current billing period.
    pub current_period_start: Option<DateTime<Utc>>,

    /// End of the current billing period.
    pub current_period_end: Option<DateTime<Utc>>,

    /// Whether the subscription cancels at period end.
    pub cancel_at_period_end: bool,
}

impl SubscriptionRecord {
    /// Build a record from a subscription event object and a resolved user id.
    pub fn from_event(subscription: &StripeSubscription, user_id: Option<String>) -> Self {
        Self {
            id: subscription.id.clone(),
            user_id,
            status: subscription.status.clone(),
            price_id: subscription.price_id().map(String::from),
            current_period_start: normalize_epoch(subscription.current_period_start.as_ref()),
            current_period_end: normalize_epoch(subscription.current_period_end.as_ref()),
            cancel_at_period_end: subscription.cancel_at_period_end,
        }
    }
}
