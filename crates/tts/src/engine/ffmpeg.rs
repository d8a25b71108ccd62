use std::{ffi::OsString, path::Path, process::Command};

use relay_config::TranscoderConfig;

use super::{Transcoder, run_captured};
use crate::error::EngineError;

/// `ffmpeg` WAV to MP3 conversion
pub struct FfmpegTranscoder {
    program: String,
    codec: String,
    quality: String,
}

impl FfmpegTranscoder {
    pub fn new(config: &TranscoderConfig) -> Self {
        Self {
            program: config.program.clone(),
            codec: config.codec.clone(),
            quality: config.quality.clone(),
        }
    }

    /// `-y -i <input> -codec:a <codec> -q:a <quality> <output>`
    fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-y".into(),
            "-i".into(),
            input.into(),
            "-codec:a".into(),
            (&self.codec).into(),
            "-q:a".into(),
            (&self.quality).into(),
            output.into(),
        ]
    }
}

impl Transcoder for FfmpegTranscoder {
    fn transcode(&self, input: &Path, output: &Path) -> Result<(), EngineError> {
        let mut command = Command::new(&self.program);
        command.args(self.args(input, output));

        run_captured(command, None)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_invocation() {
        let transcoder = FfmpegTranscoder::new(&TranscoderConfig::default());
        let args = transcoder.args(Path::new("/tmp/speech-1.wav"), Path::new("/tmp/speech-1.mp3"));

        assert_eq!(
            args,
            ["-y", "-i", "/tmp/speech-1.wav", "-codec:a", "libmp3lame", "-q:a", "2", "/tmp/speech-1.mp3"]
                .map(OsString::from)
        );
    }

    #[cfg(unix)]
    #[test]
    fn failing_program_reports_status() {
        let transcoder = FfmpegTranscoder::new(&TranscoderConfig {
            program: "false".to_string(),
            ..TranscoderConfig::default()
        });

        let err = transcoder
            .transcode(Path::new("in.wav"), Path::new("out.mp3"))
            .unwrap_err();
        assert!(matches!(err, EngineError::Failed { .. }));
    }
}
