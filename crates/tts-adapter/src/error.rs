/// Adapter result type
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Reasons a synthesis call produced no audio
///
/// Display strings are the log lines the host sees.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// No base URL configured
    #[error("TTS configuration error in ha_tts_adapter: missing 'base_url' base URL")]
    MissingBaseUrl,

    /// The endpoint answered with something other than 200
    #[error("TTS HTTP {status} at {url} in ha_tts_adapter: {body_prefix}")]
    Status {
        status: u16,
        url: String,
        /// First 256 characters of the response body
        body_prefix: String,
    },

    /// The endpoint answered 200 without audio
    #[error("TTS empty audio at {url} in ha_tts_adapter: zero-length response")]
    EmptyAudio { url: String },

    /// The request did not finish within the configured timeout
    #[error("TTS timeout at {base_url} in ha_tts_adapter: exceeded {secs} seconds")]
    Timeout { base_url: String, secs: u64 },

    /// The blocking request thread panicked
    #[error("TTS request exception at {base_url} in ha_tts_adapter: request thread panicked")]
    Panicked { base_url: String },

    /// Connection, TLS, or protocol failure
    #[error("TTS request exception at {base_url} in ha_tts_adapter: {source}")]
    Transport {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },
}
