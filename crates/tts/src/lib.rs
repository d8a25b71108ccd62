#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod engine;
mod error;
mod patch;
mod request;
mod scratch;
mod server;
mod types;

use std::sync::Arc;

use axum::{Router, extract::State, routing::get};

pub use error::{EngineError, Result, TtsError};
pub use patch::LexicalPatches;
pub use request::RawText;
pub use server::{Server, TtsServerBuilder};
pub use types::{SpeechResponse, Waveform};

/// Build the TTS server from configuration
pub fn build_server(config: &relay_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        TtsServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize TTS server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for TTS
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/synthesize", get(synthesize))
        .route("/synthesize/", get(synthesize))
        .route("/synthesize/{*text}", get(synthesize))
}

/// Handle speech synthesis requests
async fn synthesize(State(server): State<Arc<Server>>, RawText(text): RawText) -> Result<axum::response::Response> {
    tracing::debug!(chars = text.chars().count(), "TTS synthesize handler called");

    let result = tokio::task::spawn_blocking(move || server.synthesize(&text))
        .await
        .map_err(|e| TtsError::Synthesis(format!("synthesis task failed: {e}")))
        .and_then(|result| result);

    match result {
        Ok(response) => {
            tracing::debug!(bytes = response.audio.len(), "Speech synthesis complete");
            Ok(response.into_response())
        }
        Err(e) => {
            match e {
                TtsError::EmptyInput => tracing::debug!("synthesize called without text"),
                ref other => tracing::error!("{other}"),
            }
            Err(e)
        }
    }
}
