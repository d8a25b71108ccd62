//! In-process engine doubles

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use tts::{
    EngineError, Waveform,
    engine::{Accentizer, Synthesizer, Transcoder},
};

/// Records every text it synthesizes
#[derive(Default)]
pub struct RecordingSynthesizer {
    texts: Mutex<Vec<String>>,
}

impl RecordingSynthesizer {
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

impl Synthesizer for RecordingSynthesizer {
    fn synthesize(&self, text: &str) -> Result<Waveform, EngineError> {
        self.texts.lock().unwrap().push(text.to_string());
        Ok(Waveform::mono(vec![0.25; 220], 22_050))
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Accentizer whose model is permanently unavailable
pub struct BrokenAccentizer;

impl Accentizer for BrokenAccentizer {
    fn accentize(&self, _text: &str) -> Result<String, EngineError> {
        Err(EngineError::Io(std::io::Error::other("accent model unavailable")))
    }

    fn name(&self) -> &str {
        "broken"
    }
}

/// Bytes every successful fake transcode produces
pub const MP3_BYTES: &[u8] = b"ID3\x04\x00\x00integration";

/// Writes [`MP3_BYTES`], or fails the way a crashing ffmpeg does
pub struct FakeTranscoder {
    fail: bool,
}

impl FakeTranscoder {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self { fail: false })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { fail: true })
    }
}

impl Transcoder for FakeTranscoder {
    fn transcode(&self, input: &Path, output: &Path) -> Result<(), EngineError> {
        if !input.exists() {
            return Err(EngineError::Io(std::io::Error::other("input WAV missing")));
        }

        if self.fail {
            return Err(EngineError::Failed {
                program: "ffmpeg".to_string(),
                status: exit_status(1),
                stderr: "Conversion failed!".to_string(),
            });
        }

        std::fs::write(output, MP3_BYTES)?;
        Ok(())
    }
}

#[cfg(unix)]
fn exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    std::process::ExitStatus::from_raw(code as u32)
}
