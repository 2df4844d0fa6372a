//! Route composition.

use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};

/// Webhook routes, mounted under `/api/webhooks`.
fn webhook_routes() -> Router<AppState> {
    Router::new().route("/stripe", post(handlers::handle_stripe_webhook))
}

/// API routes, mounted under `/api`.
fn api_routes() -> Router<AppState> {
    Router::new().route("/checkout", post(handlers::start_checkout))
}

/// Assemble the full application router.
///
/// CORS is permissive so browser clients can reach the checkout endpoint
/// directly; the layer also answers OPTIONS preflight requests.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/webhooks", webhook_routes())
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
