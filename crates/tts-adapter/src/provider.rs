use std::collections::HashMap;

use relay_config::{AdapterConfig, AudioFormat};
use reqwest::header::ACCEPT;
use tokio::sync::OnceCell;

use crate::{
    DEFAULT_LANGUAGE, PROVIDER_NAME, SUPPORTED_LANGUAGES,
    error::{AdapterError, Result},
    request::{interpret, synthesis_url, transport_error},
};

/// Host-supplied synthesis options; accepted and not forwarded
pub type Options = HashMap<String, String>;

/// `(Some(format), Some(audio))` on success, `(None, None)` on any failure
pub type SynthesisResult = (Option<AudioFormat>, Option<Vec<u8>>);

/// TTS provider backed by a remote synthesis endpoint
///
/// Each call makes exactly one request. The async HTTP client is created on
/// first use from inside the calling task, so the provider itself can be
/// constructed outside any runtime.
#[derive(Debug)]
pub struct TtsProvider {
    config: AdapterConfig,
    client: OnceCell<reqwest::Client>,
}

impl TtsProvider {
    pub fn new(config: AdapterConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    pub const fn config(&self) -> &AdapterConfig {
        &self.config
    }
}

/// Host-facing metadata
#[allow(clippy::unused_self)]
impl TtsProvider {
    pub const fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    pub const fn default_language(&self) -> &'static str {
        DEFAULT_LANGUAGE
    }

    pub const fn supported_languages(&self) -> &'static [&'static str] {
        SUPPORTED_LANGUAGES
    }
}

impl TtsProvider {
    /// Synthesize `message`, blocking the current thread
    ///
    /// Safe to call from any thread, including an async runtime worker, though
    /// [`Self::async_get_tts_audio`] is preferred there since this blocks the
    /// worker for the whole request.
    pub fn get_tts_audio(&self, message: &str, _language: Option<&str>, _options: Option<&Options>) -> SynthesisResult {
        sentinel(self.try_get_tts_audio(message))
    }

    /// Synthesize `message` without blocking
    pub async fn async_get_tts_audio(
        &self,
        message: &str,
        _language: Option<&str>,
        _options: Option<&Options>,
    ) -> SynthesisResult {
        sentinel(self.try_async_get_tts_audio(message).await)
    }

    /// Blocking synthesis returning the failure reason
    pub fn try_get_tts_audio(&self, message: &str) -> Result<(AudioFormat, Vec<u8>)> {
        let url = synthesis_url(&self.config.base_url, message)?;

        // The blocking client panics when built or dropped on a thread driving a runtime
        let audio = std::thread::scope(|scope| scope.spawn(|| self.fetch_blocking(&url)).join()).map_err(|_| {
            AdapterError::Panicked {
                base_url: self.config.base_url.clone(),
            }
        })??;

        Ok((self.config.format, audio))
    }

    fn fetch_blocking(&self, url: &str) -> Result<Vec<u8>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout_duration())
            .build()
            .map_err(|e| self.transport_error(e))?;

        let response = client
            .get(url)
            .header(ACCEPT, self.config.format.content_type())
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.bytes().map_err(|e| self.transport_error(e))?;

        interpret(url, status, body.to_vec())
    }

    /// Async synthesis returning the failure reason
    pub async fn try_async_get_tts_audio(&self, message: &str) -> Result<(AudioFormat, Vec<u8>)> {
        let url = synthesis_url(&self.config.base_url, message)?;

        let client = self
            .client
            .get_or_try_init(|| async { reqwest::Client::builder().build() })
            .await
            .map_err(|e| self.transport_error(e))?;

        let response = client
            .get(&url)
            .timeout(self.config.timeout_duration())
            .header(ACCEPT, self.config.format.content_type())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;

        let audio = interpret(&url, status, body.to_vec())?;
        Ok((self.config.format, audio))
    }

    fn transport_error(&self, source: reqwest::Error) -> AdapterError {
        transport_error(&self.config.base_url, self.config.timeout.get(), source)
    }
}

/// Log a failure and collapse the outcome into the host-facing shape
fn sentinel(result: Result<(AudioFormat, Vec<u8>)>) -> SynthesisResult {
    match result {
        Ok((format, audio)) => {
            tracing::debug!(provider = PROVIDER_NAME, bytes = audio.len(), "TTS audio received");
            (Some(format), Some(audio))
        }
        Err(e) => {
            tracing::error!("{e}");
            (None, None)
        }
    }
}
