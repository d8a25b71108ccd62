use std::{io::Cursor, path::Path};

use crate::error::EngineError;

/// Uncompressed audio produced by the synthesizer
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Interleaved samples in `[-1.0, 1.0]`
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl Waveform {
    /// Mono waveform from raw samples
    pub const fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
            channels: 1,
        }
    }

    /// Decode a WAV byte stream, normalizing integer PCM to `f32`
    pub fn from_wav_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
        let spec = reader.spec();

        let samples = match spec.sample_format {
            hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => {
                #[allow(clippy::cast_precision_loss)]
                let scale = (1_i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|s| s as f32 / scale))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(Self {
            samples,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
        })
    }

    /// Append `secs` seconds of silence
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn append_silence(&mut self, secs: f32) {
        if secs <= 0.0 {
            return;
        }

        let frames = (f64::from(self.sample_rate) * f64::from(secs)).round() as usize;
        let len = self.samples.len() + frames * usize::from(self.channels);
        self.samples.resize(len, 0.0);
    }

    /// Duration of the audio in seconds
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.channels) / f64::from(self.sample_rate)
    }

    /// Write the audio to a 32-bit float WAV file
    pub fn write_wav(&self, path: &Path) -> Result<(), EngineError> {
        let spec = hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };

        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sample in &self.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;

        Ok(())
    }
}

/// Encoded audio returned to the client
#[derive(Debug)]
pub struct SpeechResponse {
    /// Raw audio bytes
    pub audio: Vec<u8>,
    /// Content type of the audio (e.g. "audio/mpeg")
    pub content_type: &'static str,
    /// Filename advertised in `Content-Disposition`
    pub filename: &'static str,
}

impl SpeechResponse {
    /// MP3 payload as produced by the transcoder
    pub const fn mp3(audio: Vec<u8>) -> Self {
        Self {
            audio,
            content_type: "audio/mpeg",
            filename: "speech.mp3",
        }
    }

    /// Convert the speech response into an axum HTTP response
    pub fn into_response(self) -> axum::response::Response {
        use axum::response::IntoResponse;

        (
            [
                (http::header::CONTENT_TYPE, self.content_type.to_string()),
                (
                    http::header::CONTENT_DISPOSITION,
                    format!("inline; filename=\"{}\"", self.filename),
                ),
            ],
            self.audio,
        )
            .into_response()
    }
}
