//! HTTP request handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::{CheckoutError, ReconcileSubscriptionHandler, StartCheckoutHandler};
use crate::domain::WebhookError;

use super::dto::{CheckoutResponse, ErrorResponse, WebhookAck};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub reconciler: Arc<ReconcileSubscriptionHandler>,
    pub checkout: Arc<StartCheckoutHandler>,
}

/// `POST /api/webhooks/stripe`
///
/// Verifies and applies a Stripe webhook delivery. Accepted and skipped
/// events both acknowledge with 200; every failure acknowledges with 400 so
/// Stripe retries the delivery.
pub async fn handle_stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|value| value.to_str().ok());

    let Some(signature) = signature else {
        let err = WebhookError::MissingSignature;
        return (err.status_code(), Json(ErrorResponse::new(err.to_string()))).into_response();
    };

    match state.reconciler.handle(&body, signature).await {
        Ok(_) => (StatusCode::OK, Json(WebhookAck::received())).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "webhook rejected");
            (err.status_code(), Json(ErrorResponse::new(err.to_string()))).into_response()
        }
    }
}

/// `POST /api/checkout`
///
/// Starts a checkout session for the authenticated user. The user id is
/// supplied by the upstream auth layer via the `X-User-Id` header.
pub async fn start_checkout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let user_id = headers
        .get("X-User-Id")
        .and_then(|value| value.to_str().ok());

    let Some(user_id) = user_id else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("missing user identity")),
        )
            .into_response();
    };

    match state.checkout.handle(user_id).await {
        Ok(session) => (
            StatusCode::OK,
            Json(CheckoutResponse {
                session_id: session.id,
                url: session.url,
            }),
        )
            .into_response(),
        Err(err) => {
            tracing::warn!(user_id, error = %err, "checkout failed");
            let status = match &err {
                CheckoutError::ProfileNotFound => StatusCode::NOT_FOUND,
                CheckoutError::PriceNotConfigured => StatusCode::CONFLICT,
                CheckoutError::Payment(_) | CheckoutError::Store(_) => StatusCode::BAD_GATEWAY,
            };
            (status, Json(ErrorResponse::new(err.to_string()))).into_response()
        }
    }
}
