//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own catalog and classifier
//! files, loaded through the same functions the binary uses.

use super::constants::*;
use super::fixtures::{write_test_artifacts, write_test_catalog};
use moodify_server::classifier::EmotionClassifier;
use moodify_server::server::state::OptionalClassifier;
use moodify_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use moodify_server::{load_catalog, load_classifier, Catalog};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance with isolated fixtures
///
/// When dropped, the server gracefully shuts down and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// The catalog the server was started with
    pub catalog: Arc<Catalog>,

    // Private fields - keep resources alive until drop
    _temp_catalog_dir: TempDir,
    _temp_artifacts_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port with the fixture classifier
    ///
    /// # Panics
    ///
    /// Panics if fixtures cannot be written or loaded, or if the server
    /// doesn't become ready within timeout.
    pub async fn spawn() -> Self {
        Self::spawn_with(true).await
    }

    /// Spawns a server whose classifier failed to load
    pub async fn spawn_without_classifier() -> Self {
        Self::spawn_with(false).await
    }

    async fn spawn_with(with_classifier: bool) -> Self {
        let (temp_catalog_dir, catalog_path) =
            write_test_catalog().expect("Failed to write test catalog");
        let (temp_artifacts_dir, vectorizer_path, model_path) =
            write_test_artifacts().expect("Failed to write classifier artifacts");

        let catalog = Arc::new(load_catalog(&catalog_path).expect("Failed to load test catalog"));

        let classifier: OptionalClassifier = if with_classifier {
            let classifier = load_classifier(&vectorizer_path, &model_path)
                .expect("Failed to load test classifier");
            Some(Arc::new(classifier) as Arc<dyn EmotionClassifier>)
        } else {
            None
        };

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            ..Default::default()
        };

        let app = make_app(config, catalog.clone(), classifier).expect("Failed to build app");

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
            catalog,
            _temp_catalog_dir: temp_catalog_dir,
            _temp_artifacts_dir: temp_artifacts_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling /
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
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
