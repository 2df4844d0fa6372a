//! Core domain types and logic for subscription reconciliation.
//!
//! Everything in this module is pure: no I/O, no database access, no HTTP.
//! Adapters feed raw webhook bytes in and receive validated domain values out.

pub mod stripe_event;
pub mod subscription;
pub mod timestamp;
pub mod webhook_errors;
pub mod webhook_verifier;

pub use stripe_event::{StripeEvent, StripeEventType, StripeSubscription, USER_ID_METADATA_KEY};
pub use subscription::SubscriptionRecord;
pub use webhook_errors::WebhookError;
pub use webhook_verifier::WebhookVerifier;
