#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Text-to-speech provider that relays text to a remote synthesis endpoint
//!
//! Failures never reach the host: every entry point logs one error line and
//! returns the `(None, None)` sentinel. The `try_` variants expose the
//! underlying [`AdapterError`] instead.

mod error;
mod provider;
mod request;

pub use error::{AdapterError, Result};
pub use provider::{Options, SynthesisResult, TtsProvider};
pub use relay_config::{AdapterConfig, AudioFormat};
pub use request::encode_text;

/// Name the provider registers under
pub const PROVIDER_NAME: &str = "ha_tts_adapter";

/// Language assumed when the host does not pass one
pub const DEFAULT_LANGUAGE: &str = "ru";

/// Languages advertised to the host
pub const SUPPORTED_LANGUAGES: &[&str] = &["ru", "ru-ru", "en", "en-us"];
