//! Stripe webhook event types.
//!
//! Defines the structures for parsing Stripe webhook payloads.
//! Only fields relevant to subscription reconciliation are captured;
//! everything else in Stripe's event schema is ignored on deserialization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Metadata key under which the application user id is stored on Stripe
/// subscriptions and customers.
pub const USER_ID_METADATA_KEY: &str = "supabase_id";

/// Stripe webhook event envelope (simplified).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Unique identifier for the event (evt_xxx format).
    pub id: String,

    /// Type of event (e.g., "customer.subscription.updated").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Time at which the event was created (Unix timestamp).
    pub created: i64,

    /// Object containing event-specific data.
    pub data: StripeEventData,

    /// Whether this is a live mode event (vs test mode).
    #[serde(default)]
    pub livemode: bool,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object that triggered the event (polymorphic based on event type).
    pub object: serde_json::Value,
}

impl StripeEvent {
    /// Parse the event type into a known enum variant.
    pub fn parsed_type(&self) -> StripeEventType {
        StripeEventType::from_str(&self.event_type)
    }

    /// Attempts to deserialize the data object as the specified type.
    pub fn deserialize_object<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.object.clone())
    }
}

/// Subscription lifecycle event types this service reconciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripeEventType {
    /// Customer subscription was created.
    SubscriptionCreated,
    /// Customer subscription was updated.
    SubscriptionUpdated,
    /// Customer subscription was deleted.
    SubscriptionDeleted,
    /// Unknown or unhandled event type.
    Unknown,
}

impl StripeEventType {
    /// Parse event type from string.
    ///
    /// Matching is exact. Near-miss strings such as
    /// "customer.subscription.create" map to `Unknown`.
    pub fn from_str(s: &str) -> Self {
        match s {
            "customer.subscription.created" => Self::SubscriptionCreated,
            "customer.subscription.updated" => Self::SubscriptionUpdated,
            "customer.subscription.deleted" => Self::SubscriptionDeleted,
            _ => Self::Unknown,
        }
    }

    /// Convert to the Stripe event type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubscriptionCreated => "customer.subscription.created",
            Self::SubscriptionUpdated => "customer.subscription.updated",
            Self::SubscriptionDeleted => "customer.subscription.deleted",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this event type is a subscription lifecycle event.
    pub fn is_lifecycle(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Subscription object carried inside a lifecycle event.
///
/// Fields Stripe is known to occasionally omit are defaulted so that a sparse
/// payload still deserializes. Missing data degrades to `None`, never to a
/// rejected event.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeSubscription {
    /// Subscription identifier (sub_xxx format).
    pub id: String,

    /// Subscription status verbatim from Stripe (active, past_due, canceled, ...).
    pub status: String,

    /// Owning customer, either as a bare id or an expanded object.
    #[serde(default)]
    pub customer: Option<CustomerRef>,

    /// Free-form metadata attached to the subscription.
    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// Subscription line items.
    #[serde(default)]
    pub items: SubscriptionItems,

    /// Period start, as seconds or milliseconds since epoch, possibly a string.
    #[serde(default)]
    pub current_period_start: Option<serde_json::Value>,

    /// Period end, same representations as `current_period_start`.
    #[serde(default)]
    pub current_period_end: Option<serde_json::Value>,

    /// Whether the subscription cancels at the end of the current period.
    #[serde(default)]
    pub cancel_at_period_end: bool,
}

/// Customer reference: Stripe sends either the id string or an expanded object.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CustomerRef {
    Id(String),
    Object { id: String },
}

impl CustomerRef {
    pub fn id(&self) -> &str {
        match self {
            CustomerRef::Id(id) => id,
            CustomerRef::Object { id } => id,
        }
    }
}

/// Container for subscription line items.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SubscriptionItems {
    #[serde(default)]
    pub data: Vec<SubscriptionItem>,
}

/// A single subscription line item.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubscriptionItem {
    pub price: Price,
}

/// Price attached to a line item.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Price {
    pub id: String,
}

impl StripeSubscription {
    /// Owning customer id, if present.
    pub fn customer_id(&self) -> Option<&str> {
        self.customer.as_ref().map(|c| c.id())
    }

    /// Price id of the first line item, if any.
    pub fn price_id(&self) -> Option<&str> {
        self.items.data.first().map(|item| item.price.id.as_str())
    }

    /// Application user id from subscription metadata, if set.
    pub fn metadata_user_id(&self) -> Option<&str> {
        self.metadata.get(USER_ID_METADATA_KEY).map(String::as_str)
    }
}
