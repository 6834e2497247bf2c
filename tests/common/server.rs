//! Test server lifecycle management
//!
//! This module spawns the server under test next to a fake upstream and
//! shuts both down when the test is over.

use super::constants::*;
use super::upstream::FakeUpstream;
use soundfeed_tools::config::UpstreamUrls;
use soundfeed_tools::{
    make_app, AppConfig, CliConfig, Credentials, RequestsLoggingLevel, ServerConfig, Services,
};
use std::time::Duration;
use tokio::net::TcpListener;

/// Which optional integrations the server under test gets credentials for.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestServerOptions {
    pub with_facebook: bool,
}

/// Test server instance wired to its own fake upstream
///
/// When dropped, the server gracefully shuts down, and so does the upstream.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// The fake third-party APIs, for scripting completions and inspecting calls
    pub upstream: FakeUpstream,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server without Facebook credentials
    pub async fn spawn() -> Self {
        Self::spawn_with(TestServerOptions::default()).await
    }

    /// Spawns a server with the social routes enabled
    pub async fn spawn_with_facebook() -> Self {
        Self::spawn_with(TestServerOptions {
            with_facebook: true,
        })
        .await
    }

    /// Spawns a new test server on a random port
    ///
    /// This function:
    /// 1. Starts a fake upstream on its own random port
    /// 2. Resolves a config pointing every client at the fake upstream
    /// 3. Builds the services and the app
    /// 4. Binds to a random port (127.0.0.1:0) and serves in a background task
    /// 5. Waits for the server to be ready
    ///
    /// # Panics
    ///
    /// Panics if the config does not resolve, the services cannot be built,
    /// or the server does not become ready within the timeout.
    pub async fn spawn_with(options: TestServerOptions) -> Self {
        let upstream = FakeUpstream::spawn().await;
        let config = test_config(&upstream, options);
        let services = Services::from_config(&config).expect("Failed to build services");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let server_config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            frontend_dir_path: None,
        };
        let app = make_app(server_config, services);

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
            upstream,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the home endpoint
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

fn test_config(upstream: &FakeUpstream, options: TestServerOptions) -> AppConfig {
    let facebook = |value: &str| options.with_facebook.then(|| value.to_string());
    let cli = CliConfig {
        upstream_timeout_sec: UPSTREAM_TIMEOUT_SECS,
        logging_level: RequestsLoggingLevel::None,
        credentials: Credentials {
            spotify_client_id: Some(SPOTIFY_CLIENT_ID.to_string()),
            spotify_client_secret: Some(SPOTIFY_CLIENT_SECRET.to_string()),
            youtube_api_key: Some(YOUTUBE_API_KEY.to_string()),
            openrouter_api_key: Some(OPENROUTER_API_KEY.to_string()),
            facebook_app_id: facebook(FACEBOOK_APP_ID),
            facebook_app_secret: facebook(FACEBOOK_APP_SECRET),
        },
        ..Default::default()
    };

    let mut config = AppConfig::resolve(&cli, None).expect("Failed to resolve test config");
    config.upstream = UpstreamUrls {
        spotify_api: upstream.spotify_api_url(),
        spotify_accounts: upstream.spotify_accounts_url(),
        itunes: upstream.itunes_url(),
        youtube: upstream.youtube_url(),
        facebook_graph: upstream.facebook_graph_url(),
        openrouter: upstream.openrouter_url(),
    };
    config.description.timeout_sec = UPSTREAM_TIMEOUT_SECS;
    config
}
