//! Application use cases.
//!
//! Orchestrates domain logic with the outbound ports. Each handler owns a
//! single inbound operation.

pub mod identity;
pub mod reconcile_subscription;
pub mod start_checkout;

pub use identity::IdentityResolver;
pub use reconcile_subscription::{ReconcileOutcome, ReconcileSubscriptionHandler};
pub use start_checkout::{CheckoutError, StartCheckoutHandler};
