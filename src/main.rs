//! dwello server entry point.
//!
//! Starts the Axum HTTP server after applying migrations and wiring
//! every component to its explicitly owned collaborators.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use dwello::api;
use dwello::app_state::AppState;
use dwello::auth::{AuthGate, JwtVerifier};
use dwello::config::AppConfig;
use dwello::persistence::{AgreementStore, PgStore, RoleStore};
use dwello::service::{AgreementLifecycle, HttpPaymentGateway, PaymentGateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env().map_err(|err| anyhow::anyhow!("{err}"))?;
    tracing::info!(addr = %config.listen_addr, "starting dwello");

    // Open the storage handle and bring the schema up to date
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await
        .context("connecting to the database")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("applying migrations")?;

    // Wire components: the store is the single storage handle, injected
    // into the gate and the lifecycle manager at construction time.
    let store = Arc::new(PgStore::new(pool));
    let verifier = Arc::new(JwtVerifier::new(
        &config.auth_token_secret,
        config.auth_token_audience.as_deref(),
    ));
    let gate = Arc::new(AuthGate::new(
        verifier,
        Arc::clone(&store) as Arc<dyn RoleStore>,
    ));
    let lifecycle = Arc::new(AgreementLifecycle::new(
        Arc::clone(&store) as Arc<dyn AgreementStore>,
        Arc::clone(&store) as Arc<dyn RoleStore>,
    ));
    let gateway: Arc<dyn PaymentGateway> = Arc::new(HttpPaymentGateway::new(
        config.payment_gateway_url.clone(),
        config.payment_gateway_secret.clone(),
    ));

    let app_state = AppState {
        store,
        gate,
        lifecycle,
        gateway,
    };

    // Build router
    let app = api::build_router();
    #[cfg(feature = "swagger-ui")]
    let app = app.merge(api::docs_router());
    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(cors_layer(&config.allowed_origins))
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .context("binding the listen address")?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await.context("serving")?;

    Ok(())
}

/// CORS policy from the configured origin list; `*` allows any origin.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
