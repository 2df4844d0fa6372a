//! Payment (Stripe) configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Stripe payment configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key (sk_test_... or sk_live_...)
    pub stripe_api_key: SecretString,

    /// Stripe webhook signing secret (whsec_...)
    pub stripe_webhook_secret: SecretString,

    /// Maximum accepted age of a webhook signature timestamp, in seconds
    #[serde(default = "default_webhook_tolerance")]
    pub webhook_tolerance_secs: i64,

    /// Price to use when starting a checkout session
    #[serde(default)]
    pub checkout_price_id: Option<String>,

    /// Redirect target after a completed checkout
    #[serde(default = "default_success_url")]
    pub checkout_success_url: String,

    /// Redirect target after an abandoned checkout
    #[serde(default = "default_cancel_url")]
    pub checkout_cancel_url: String,
}

impl PaymentConfig {
    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let api_key = self.stripe_api_key.expose_secret();
        if !api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }

        let webhook_secret = self.stripe_webhook_secret.expose_secret();
        if !webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        if self.webhook_tolerance_secs <= 0 || self.webhook_tolerance_secs > 3600 {
            return Err(ValidationError::InvalidWebhookTolerance);
        }

        Ok(())
    }

    /// Check if using a test-mode API key
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.expose_secret().starts_with("sk_test_")
    }

    /// Check if using a live-mode API key
    pub fn is_live_mode(&self) -> bool {
        self.stripe_api_key.expose_secret().starts_with("sk_live_")
    }
}

fn default_webhook_tolerance() -> i64 {
    300
}

fn default_success_url() -> String {
    "http://localhost:3000/?success=true".to_string()
}

fn default_cancel_url() -> String {
    "http://localhost:3000/?canceled=true".to_string()
}
