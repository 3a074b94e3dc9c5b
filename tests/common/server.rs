//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own state.

use super::constants::*;
use sentimentsense_server::dashboard::DashboardData;
use sentimentsense_server::sentiment::SentimentClassifier;
use sentimentsense_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use sentimentsense_server::social::{PostsSource, SocialAnalyzer, UpstreamClient};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Knobs for [`TestServer::spawn_with`]
pub struct TestServerOptions {
    pub upstream_url: Option<String>,
    pub upstream_token: Option<String>,
    pub simulated_post_count: usize,
    pub simulation_seed: Option<u64>,
}

impl Default for TestServerOptions {
    fn default() -> Self {
        Self {
            upstream_url: None,
            upstream_token: None,
            simulated_post_count: SIMULATED_POST_COUNT,
            simulation_seed: Some(SIMULATION_SEED),
        }
    }
}

/// Test server instance
///
/// When dropped, the server gracefully shuts down.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port, without upstream provider
    pub async fn spawn() -> Self {
        Self::spawn_with(TestServerOptions::default()).await
    }

    /// Spawns a new test server on a random port
    ///
    /// # Panics
    ///
    /// Panics if port binding fails or the server doesn't become ready
    /// within timeout.
    pub async fn spawn_with(options: TestServerOptions) -> Self {
        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            metrics_port: 0,
            requests_logging_level: RequestsLoggingLevel::None,
            request_timeout_sec: REQUEST_TIMEOUT_SECS,
        };

        let source: Option<Arc<dyn PostsSource>> = options.upstream_url.map(|url| {
            Arc::new(
                UpstreamClient::new(url, options.upstream_token, 2)
                    .expect("Failed to build upstream client"),
            ) as Arc<dyn PostsSource>
        });

        let classifier = SentimentClassifier::default();
        let analyzer = SocialAnalyzer::new(
            classifier.clone(),
            source,
            options.simulated_post_count,
            options.simulation_seed,
        );
        let app = make_app(config, classifier, analyzer, DashboardData::demo());

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling `/`
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => {
                    // Server is ready
                    return;
                }
                _ => {
                    // Server not ready yet, wait and retry
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Send shutdown signal
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
