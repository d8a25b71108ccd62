use std::path::PathBuf;

use serde::Deserialize;

/// Neural synthesis model configuration
///
/// The model runs out of process: `program` is invoked once per request with
/// the model path and length scale, reads text on stdin and writes a WAV
/// stream to stdout.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthesisConfig {
    /// Synthesis executable looked up on `PATH`
    #[serde(default = "default_program")]
    pub program: String,
    /// Model location, overridden by `MODEL_PATH`
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    /// Phoneme length multiplier; 2.0 gives slow, deliberate speech
    #[serde(default = "default_length_scale")]
    pub length_scale: f32,
    /// Silence appended to every waveform, in seconds
    #[serde(default = "default_trailing_silence")]
    pub trailing_silence_secs: f32,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            model_path: default_model_path(),
            length_scale: default_length_scale(),
            trailing_silence_secs: default_trailing_silence(),
        }
    }
}

fn default_program() -> String {
    "piper".to_string()
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/glados2.onnx")
}

#[allow(clippy::missing_const_for_fn)]
fn default_length_scale() -> f32 {
    2.0
}

#[allow(clippy::missing_const_for_fn)]
fn default_trailing_silence() -> f32 {
    0.5
}
