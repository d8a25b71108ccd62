use std::path::PathBuf;

use serde::Deserialize;

/// External WAV to MP3 transcoder
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscoderConfig {
    /// Transcoder executable looked up on `PATH`
    #[serde(default = "default_program")]
    pub program: String,
    /// Audio codec passed as `-codec:a`
    #[serde(default = "default_codec")]
    pub codec: String,
    /// VBR quality passed as `-q:a`
    #[serde(default = "default_quality")]
    pub quality: String,
    /// Directory for per-request WAV/MP3 scratch files, defaults to the system temp dir
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            codec: default_codec(),
            quality: default_quality(),
            scratch_dir: None,
        }
    }
}

fn default_program() -> String {
    "ffmpeg".to_string()
}

fn default_codec() -> String {
    "libmp3lame".to_string()
}

fn default_quality() -> String {
    "2".to_string()
}
