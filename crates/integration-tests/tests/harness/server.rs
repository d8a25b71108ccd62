//! Test server wrapper that starts the relay on a random port

use std::{net::SocketAddr, sync::Arc};

use relay_config::{AdapterConfig, Config, ServerConfig};
use relay_server::Server;
use tokio_util::sync::CancellationToken;
use tts_adapter::TtsProvider;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a test server with the given configuration
    ///
    /// Engines are built from the configuration exactly as in production
    pub async fn start(config: &Config) -> anyhow::Result<Self> {
        Self::serve(Server::new(config)?).await
    }

    /// Start a test server around a hand-assembled pipeline
    pub async fn with_pipeline(pipeline: tts::Server) -> anyhow::Result<Self> {
        Self::serve(Server::with_pipeline(Arc::new(pipeline), &ServerConfig::default())).await
    }

    async fn serve(server: Server) -> anyhow::Result<Self> {
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        // Bind the listener here so we know the actual port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, server.into_router())
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        let client = reqwest::Client::new();

        Ok(Self { addr, shutdown, client })
    }

    /// URL of `path` on the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Base URL handed to the adapter
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Adapter pointed at this server
    pub fn provider(&self) -> TtsProvider {
        TtsProvider::new(AdapterConfig::new(self.base_url()))
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
