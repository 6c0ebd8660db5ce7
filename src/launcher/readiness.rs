use std::time::Duration;
use tracing::{error, info, warn};

/// Block until the prediction service reports healthy.
///
/// Connection failures and non-200 responses both count as "not ready yet".
/// Fixed delay between attempts, no backoff. Returns false once the retry
/// budget is exhausted.
pub async fn wait_until_healthy(
    client: &reqwest::Client,
    url: &str,
    max_retries: u32,
    delay: Duration,
) -> bool {
    for attempt in 1..=max_retries {
        match client.get(url).send().await {
            Ok(response) if response.status().is_success() => {
                info!(url, attempt, "Prediction service is ready");
                return true;
            }
            Ok(response) => {
                warn!(
                    url,
                    attempt,
                    max_retries,
                    status = response.status().as_u16(),
                    "Prediction service not ready"
                );
            }
            Err(e) => {
                info!(
                    url,
                    attempt,
                    max_retries,
                    "Prediction service not reachable yet: {}",
                    e
                );
            }
        }
        tokio::time::sleep(delay).await;
    }

    error!(
        url,
        max_retries, "Prediction service did not become healthy within the retry budget"
    );
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ready_on_first_200() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/health")
            .with_status(200)
            .with_body(r#"{"status":"ok","message":"service is running"}"#)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/health", server.url());
        assert!(wait_until_healthy(&client, &url, 3, Duration::from_millis(10)).await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_200_exhausts_retry_budget() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/health")
            .with_status(500)
            .with_body(r#"{"status":"error","message":"classifier artifact is not loaded"}"#)
            .expect(4)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/health", server.url());
        assert!(!wait_until_healthy(&client, &url, 4, Duration::from_millis(10)).await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_failure_counts_as_not_ready() {
        // Nothing listens on this port
        let client = reqwest::Client::new();
        let healthy = wait_until_healthy(
            &client,
            "http://127.0.0.1:1/health",
            2,
            Duration::from_millis(10),
        )
        .await;
        assert!(!healthy);
    }
}
