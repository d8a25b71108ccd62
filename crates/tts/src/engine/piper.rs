use std::{
    path::{Path, PathBuf},
    process::Command,
};

use relay_config::SynthesisConfig;

use super::{Synthesizer, display_program, run_captured};
use crate::{error::EngineError, types::Waveform};

/// Out-of-process VITS synthesizer speaking the `piper` command-line protocol
///
/// One process per request: text on stdin, a WAV stream on stdout.
pub struct PiperSynthesizer {
    program: String,
    model_path: PathBuf,
    length_scale: f32,
    trailing_silence_secs: f32,
    name: String,
}

impl PiperSynthesizer {
    /// Create the synthesizer, failing if the model file is missing
    pub fn new(config: &SynthesisConfig) -> Result<Self, EngineError> {
        if !config.model_path.is_file() {
            return Err(EngineError::ModelNotFound(config.model_path.clone()));
        }

        Ok(Self {
            program: config.program.clone(),
            model_path: config.model_path.clone(),
            length_scale: config.length_scale,
            trailing_silence_secs: config.trailing_silence_secs,
            name: display_program(config.program.as_ref()),
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("--model")
            .arg(&self.model_path)
            .arg("--length_scale")
            .arg(self.length_scale.to_string())
            .arg("--output_file")
            .arg("-")
            .env("TOKENIZERS_PARALLELISM", "false");
        command
    }
}

impl Synthesizer for PiperSynthesizer {
    fn synthesize(&self, text: &str) -> Result<Waveform, EngineError> {
        let mut input = text.as_bytes().to_vec();
        input.push(b'\n');

        let output = run_captured(self.command(), Some(&input))?;

        let mut waveform = Waveform::from_wav_bytes(&output.stdout)?;
        waveform.append_silence(self.trailing_silence_secs);

        Ok(waveform)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
