use clap::Parser;
use review_sentiment::{
    config::Config,
    launcher::{wait_until_healthy, Supervisor},
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Launch the prediction API and the dashboard UI as supervised children
#[derive(Debug, Parser)]
#[command(name = "review-sentiment-launcher", version, about)]
struct Args {
    /// Path to a configuration override file
    #[arg(long, env = "CONFIG_PATH")]
    config: Option<String>,

    /// Do not open a browser tab once the UI is up
    #[arg(long)]
    no_browser: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting review-sentiment system v{}",
        env!("CARGO_PKG_VERSION")
    );

    let mut supervisor = Supervisor::new();

    // The API and UI binaries ship next to the launcher
    let api_bin = sibling_binary("review-sentiment-api")?;
    let ui_bin = sibling_binary("review-sentiment-ui")?;

    let mut api_command = Command::new(&api_bin);
    if let Some(path) = &args.config {
        api_command.env("CONFIG_PATH", path);
    }
    supervisor.spawn("api", &mut api_command)?;

    // Readiness barrier: the UI is only started once the API answers
    let health_url = format!("{}/health", config.ui.api_url.trim_end_matches('/'));
    let client = reqwest::Client::new();
    let healthy = wait_until_healthy(
        &client,
        &health_url,
        config.launcher.health_max_retries,
        Duration::from_secs(config.launcher.health_retry_delay_secs),
    )
    .await;

    if !healthy {
        tracing::error!("Prediction service failed to start; shutting down");
        supervisor.shutdown().await;
        std::process::exit(1);
    }

    let mut ui_command = Command::new(&ui_bin);
    if let Some(path) = &args.config {
        ui_command.env("CONFIG_PATH", path);
    }
    supervisor.spawn("ui", &mut ui_command)?;

    let ui_addr = format!("http://localhost:{}", config.ui.port);
    tracing::info!("Dashboard UI starting at {}", ui_addr);

    // Open the browser on a concurrent task so it never delays the UI
    if config.launcher.open_browser && !args.no_browser {
        let delay = Duration::from_secs(config.launcher.browser_delay_secs);
        let target = ui_addr.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match webbrowser::open(&target) {
                Ok(()) => tracing::info!("Opened browser at {}", target),
                Err(e) => tracing::warn!("Could not open browser: {}", e),
            }
        });
    }

    tracing::info!("System is running. Press Ctrl+C to exit.");

    tokio::select! {
        status = supervisor.wait("ui") => match status {
            Ok(status) => tracing::info!(%status, "UI process exited"),
            Err(e) => tracing::error!("Failed waiting on UI process: {}", e),
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received, stopping the system...");
        }
    }

    // Guaranteed teardown of every spawned child
    supervisor.shutdown().await;
    tracing::info!("System stopped");
    Ok(())
}

fn sibling_binary(name: &str) -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or_else(|| anyhow::anyhow!("launcher binary has no parent directory"))?;
    Ok(dir.join(name))
}
