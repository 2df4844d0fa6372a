//! Payment provider port.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// A customer record as seen through the payment provider.
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: String,
    pub email: Option<String>,
    pub metadata: HashMap<String, String>,
}

/// A hosted checkout session.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// Request to create a new customer.
#[derive(Debug, Clone)]
pub struct CreateCustomerRequest {
    pub email: Option<String>,
    /// Application user id, stored in customer metadata.
    pub user_id: String,
}

/// Request to create a hosted checkout session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutRequest {
    pub customer_id: String,
    pub price_id: String,
    pub success_url: String,
    pub cancel_url: String,
}

/// Errors from the payment provider.
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("network error: {0}")]
    Network(String),

    #[error("provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("response parse error: {0}")]
    Parse(String),
}

/// Outbound port to the payment provider's API.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Fetch a customer by id. Returns `None` for unknown or deleted customers.
    async fn get_customer(&self, customer_id: &str) -> Result<Option<Customer>, PaymentError>;

    /// Create a new customer.
    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, PaymentError>;

    /// Merge the given entries into a customer's metadata.
    async fn update_customer_metadata(
        &self,
        customer_id: &str,
        metadata: HashMap<String, String>,
    ) -> Result<(), PaymentError>;

    /// Create a hosted checkout session for a subscription purchase.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;
}
