//! Stripe REST API client.
//!
//! Implements the `PaymentProvider` port against the Stripe HTTP API using
//! form-encoded requests with basic auth, as Stripe expects.

use std::collections::HashMap;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::USER_ID_METADATA_KEY;
use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, CreateCustomerRequest, Customer, PaymentError,
    PaymentProvider,
};

use super::types::{StripeCheckoutSessionObject, StripeCustomerObject};

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// HTTP client for the Stripe API.
pub struct StripeApiClient {
    api_key: SecretString,
    api_base_url: String,
    http_client: reqwest::Client,
}

impl StripeApiClient {
    /// Create a client against the production Stripe API.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Point the client at a different base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, PaymentError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        tracing::error!(status = status.as_u16(), error = %message, "Stripe API request failed");
        Err(PaymentError::Provider {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl PaymentProvider for StripeApiClient {
    async fn get_customer(&self, customer_id: &str) -> Result<Option<Customer>, PaymentError> {
        let url = format!("{}/v1/customers/{}", self.api_base_url, customer_id);

        let response = self
            .http_client
            .get(&url)
            .basic_auth(self.api_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = Self::check_status(response).await?;

        let customer: StripeCustomerObject = response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))?;

        if customer.deleted {
            return Ok(None);
        }

        Ok(Some(Customer {
            id: customer.id,
            email: customer.email,
            metadata: customer.metadata,
        }))
    }

    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, PaymentError> {
        let url = format!("{}/v1/customers", self.api_base_url);

        let metadata_key = format!("metadata[{}]", USER_ID_METADATA_KEY);
        let mut params = vec![(metadata_key.as_str(), request.user_id.clone())];
        if let Some(email) = &request.email {
            params.push(("email", email.clone()));
        }

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let response = Self::check_status(response).await?;

        let customer: StripeCustomerObject = response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))?;

        Ok(Customer {
            id: customer.id,
            email: customer.email,
            metadata: customer.metadata,
        })
    }

    async fn update_customer_metadata(
        &self,
        customer_id: &str,
        metadata: HashMap<String, String>,
    ) -> Result<(), PaymentError> {
        let url = format!("{}/v1/customers/{}", self.api_base_url, customer_id);

        let params: Vec<(String, String)> = metadata
            .into_iter()
            .map(|(key, value)| (format!("metadata[{}]", key), value))
            .collect();

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        Self::check_status(response).await?;

        Ok(())
    }

    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.api_base_url);

        let params = vec![
            ("customer", request.customer_id),
            ("mode", "subscription".to_string()),
            ("line_items[0][price]", request.price_id),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", request.success_url),
            ("cancel_url", request.cancel_url),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let response = Self::check_status(response).await?;

        let session: StripeCheckoutSessionObject = response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))?;

        let session_url = session
            .url
            .ok_or_else(|| PaymentError::Parse("checkout session has no url".to_string()))?;

        Ok(CheckoutSession {
            id: session.id,
            url: session_url,
        })
    }
}
