//! Wire types for Stripe API responses.

use std::collections::HashMap;

use serde::Deserialize;

/// A customer object as returned by `GET /v1/customers/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCustomerObject {
    pub id: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// Set on tombstone responses for deleted customers.
    #[serde(default)]
    pub deleted: bool,
}

/// A checkout session object as returned by `POST /v1/checkout/sessions`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCheckoutSessionObject {
    pub id: String,

    /// Hosted payment page URL. Absent on expired sessions.
    #[serde(default)]
    pub url: Option<String>,
}
