use std::{fmt, num::NonZeroU64, time::Duration};

use serde::{Deserialize, Deserializer};

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client-side adapter configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdapterConfig {
    /// Base URL of the synthesis endpoint, stored without a trailing slash
    #[serde(deserialize_with = "deserialize_base_url")]
    pub base_url: String,
    /// Request timeout in whole seconds
    #[serde(default = "default_timeout")]
    pub timeout: NonZeroU64,
    /// Audio format reported to the host
    #[serde(default)]
    pub format: AudioFormat,
}

impl AdapterConfig {
    /// Create a configuration with the default timeout and format
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: strip_trailing_slash(&base_url.into()),
            timeout: default_timeout(),
            format: AudioFormat::default(),
        }
    }

    /// Override the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: NonZeroU64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Request timeout as a [`Duration`]
    pub const fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.get())
    }
}

/// Audio container the endpoint produces
///
/// MP3 is the only format the endpoint's transcoder emits, so it is the only
/// value configuration accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
}

impl AudioFormat {
    /// Short format name handed to the host (`"mp3"`)
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
        }
    }

    /// MIME type requested via `Accept`
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn strip_trailing_slash(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn deserialize_base_url<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(strip_trailing_slash(&raw))
}

fn default_timeout() -> NonZeroU64 {
    NonZeroU64::new(DEFAULT_TIMEOUT_SECS).unwrap_or(NonZeroU64::MIN)
}
