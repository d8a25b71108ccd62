#![allow(clippy::must_use_candidate)]

pub mod accent;
pub mod adapter;
mod env;
pub mod health;
mod loader;
pub mod server;
pub mod synthesis;
pub mod transcoder;

use indexmap::IndexMap;
use serde::Deserialize;

pub use accent::*;
pub use adapter::*;
pub use health::*;
pub use server::*;
pub use synthesis::*;
pub use transcoder::*;

/// Top-level relay configuration
///
/// Every section is optional; an empty file yields the stock pipeline
/// (piper model, no accentizer, ffmpeg transcoder, port 8124).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Neural synthesis model configuration
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    /// Stress/accent normalization configuration
    #[serde(default)]
    pub accent: AccentConfig,
    /// WAV to MP3 transcoder configuration
    #[serde(default)]
    pub transcoder: TranscoderConfig,
    /// Extra exact-match corrections applied to normalized text, keyed by the faulty form
    #[serde(default)]
    pub patches: IndexMap<String, String>,
    /// Client-side adapter configuration (used by the `say` command)
    #[serde(default)]
    pub adapter: Option<AdapterConfig>,
}
