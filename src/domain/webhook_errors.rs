//! Webhook processing error types.

use thiserror::Error;

use crate::ports::StoreError;

/// Errors that can occur while verifying or processing a webhook event.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// No Stripe-Signature header was present on the request.
    #[error("missing signature")]
    MissingSignature,

    /// Signature verification failed.
    #[error("signature verification failed")]
    InvalidSignature,

    /// Event timestamp is older than the accepted tolerance window.
    #[error("event timestamp outside tolerance window")]
    TimestampOutOfRange,

    /// Event timestamp is too far in the future.
    #[error("event timestamp is in the future")]
    InvalidTimestamp,

    /// Failed to parse the signature header or event payload.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Persistence failed while applying the event.
    #[error("database error: {0}")]
    Database(String),
}

impl WebhookError {
    /// HTTP status code for this error.
    ///
    /// All failures map to 400 so Stripe retries delivery, including
    /// transient persistence errors.
    pub fn status_code(&self) -> http::StatusCode {
        http::StatusCode::BAD_REQUEST
    }
}

impl From<StoreError> for WebhookError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(msg) => WebhookError::Database(msg),
        }
    }
}
