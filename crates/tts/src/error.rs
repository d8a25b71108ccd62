use std::{io, path::PathBuf, process::ExitStatus};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Request-level failures, each mapped to an HTTP status with a plain-text body
#[derive(Debug, Error)]
pub enum TtsError {
    /// The path carried no text
    #[error("No input")]
    EmptyInput,

    /// The transcoder ran and exited unsuccessfully
    #[error("FFmpeg conversion error: {0}")]
    Transcode(String),

    /// Any other failure inside the pipeline
    #[error("TTS synthesis error: {0}")]
    Synthesis(String),

    /// Engine construction failed at startup
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl TtsError {
    /// Get the appropriate HTTP status code for this error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyInput => StatusCode::BAD_REQUEST,
            Self::Transcode(_) | Self::Synthesis(_) | Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<EngineError> for TtsError {
    fn from(err: EngineError) -> Self {
        Self::Synthesis(err.to_string())
    }
}

impl IntoResponse for TtsError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

/// Failures raised by the accentizer, synthesizer, and transcoder engines
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine executable could not be started
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The engine executable exited with a non-zero status
    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// Model file missing at startup
    #[error("model not found at {}", .0.display())]
    ModelNotFound(PathBuf),

    /// Malformed stress dictionary
    #[error("stress dictionary {}:{line}: {reason}", path.display())]
    Dictionary { path: PathBuf, line: usize, reason: String },

    /// Synthesizer output was not a readable WAV stream
    #[error("invalid audio: {0}")]
    Audio(#[from] hound::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}
