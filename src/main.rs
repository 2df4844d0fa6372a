//! Subsync server entry point.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use subsync::adapters::http::{app_router, AppState};
use subsync::adapters::postgres::{PostgresProfileStore, PostgresSubscriptionStore};
use subsync::adapters::stripe::StripeApiClient;
use subsync::application::{IdentityResolver, ReconcileSubscriptionHandler, StartCheckoutHandler};
use subsync::config::AppConfig;
use subsync::domain::WebhookVerifier;
use subsync::ports::{PaymentProvider, ProfileStore, SubscriptionStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        test_mode = config.payment.is_test_mode(),
        "starting subsync"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("migrations applied");
    }

    let provider: Arc<dyn PaymentProvider> =
        Arc::new(StripeApiClient::new(config.payment.stripe_api_key.clone()));
    let profiles: Arc<dyn ProfileStore> = Arc::new(PostgresProfileStore::new(pool.clone()));
    let subscriptions: Arc<dyn SubscriptionStore> =
        Arc::new(PostgresSubscriptionStore::new(pool.clone()));

    let verifier = WebhookVerifier::with_tolerance(
        config.payment.stripe_webhook_secret.clone(),
        config.payment.webhook_tolerance_secs,
    );
    let resolver = IdentityResolver::standard(provider.clone(), profiles.clone());

    let state = AppState {
        reconciler: Arc::new(ReconcileSubscriptionHandler::new(
            verifier,
            resolver,
            subscriptions,
        )),
        checkout: Arc::new(StartCheckoutHandler::new(
            provider,
            profiles,
            config.payment.checkout_price_id.clone(),
            config.payment.checkout_success_url.clone(),
            config.payment.checkout_cancel_url.clone(),
        )),
    };

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app_router(state)).await?;

    Ok(())
}
