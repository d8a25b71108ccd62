#![allow(clippy::must_use_candidate)]

mod health;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use relay_config::{Config, ServerConfig};
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// Loads the synthesis engines before returning, so a missing model
    /// fails here rather than on the first request.
    ///
    /// # Errors
    ///
    /// Returns an error if the synthesis pipeline cannot be initialized
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let tts_state = tts::build_server(config)?;
        Ok(Self::with_pipeline(tts_state, &config.server))
    }

    /// Build the server around an already assembled pipeline
    pub fn with_pipeline(tts_state: Arc<tts::Server>, config: &ServerConfig) -> Self {
        let mut app = Router::new();

        // Health check
        if config.health.enabled {
            app = app.route(&config.health.path, axum::routing::get(health::health_handler));
        }

        // TTS routes
        app = app.merge(tts::endpoint_router().with_state(tts_state));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Self {
            router: app,
            listen_address: config.listen_address(),
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
