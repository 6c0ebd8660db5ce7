use review_sentiment::{
    api::{build_router, AppState},
    config::Config,
    model::PredictionService,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?;

    // Initialize tracing; the configured level (and debug flag) seeds the
    // filter, RUST_LOG overrides it
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting review-sentiment API v{}", env!("CARGO_PKG_VERSION"));

    // Load the classifier exactly once. A failed load keeps the server up;
    // /health reports the failure and /predict fails fast.
    let service = Arc::new(PredictionService::load(&config.model));
    if service.is_ready() {
        tracing::info!("Classifier ready");
    } else {
        tracing::warn!("Running degraded: classifier failed to load");
    }

    let app = build_router(AppState::new(service));

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Prediction API listening on http://{}", addr);
    tracing::info!("   Health check: http://{}/health", addr);
    tracing::info!("   Predict:      http://{}/predict", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                tracing::error!("HTTP server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Shutting down gracefully...");
    Ok(())
}
