//! Stripe API adapter.

mod client;
mod types;

pub use client::StripeApiClient;
