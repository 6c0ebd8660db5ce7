use review_sentiment::{
    config::Config,
    ui::{build_ui_router, eda, UiState},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting review-sentiment UI v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Display-only data, computed once; restart to pick up a new dataset
    let report = eda::build_report(&config.ui.eda_data_path);
    let state = UiState::new(&config.ui.api_url, report);

    let app = build_ui_router(state);

    let addr = config.ui.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Dashboard UI listening on http://{}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                tracing::error!("UI server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Shutting down gracefully...");
    Ok(())
}
