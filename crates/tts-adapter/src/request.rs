use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::StatusCode;

use crate::error::{AdapterError, Result};

/// Everything except ASCII alphanumerics and `-._~` is escaped, `/` included
const TEXT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Longest body excerpt carried by a status error, in characters
const BODY_PREFIX_CHARS: usize = 256;

/// Percent-encode text for use as a single path segment
pub fn encode_text(text: &str) -> String {
    utf8_percent_encode(text, TEXT_ENCODE_SET).to_string()
}

/// Build `{base_url}/synthesize/{encoded}`
pub(crate) fn synthesis_url(base_url: &str, text: &str) -> Result<String> {
    if base_url.is_empty() {
        return Err(AdapterError::MissingBaseUrl);
    }

    Ok(format!("{base_url}/synthesize/{}", encode_text(text)))
}

/// Decide whether a completed exchange carries usable audio
pub(crate) fn interpret(url: &str, status: StatusCode, body: Vec<u8>) -> Result<Vec<u8>> {
    if status != StatusCode::OK {
        return Err(AdapterError::Status {
            status: status.as_u16(),
            url: url.to_string(),
            body_prefix: String::from_utf8_lossy(&body).chars().take(BODY_PREFIX_CHARS).collect(),
        });
    }

    if body.is_empty() {
        return Err(AdapterError::EmptyAudio { url: url.to_string() });
    }

    Ok(body)
}

/// Classify a transport failure
pub(crate) fn transport_error(base_url: &str, timeout_secs: u64, source: reqwest::Error) -> AdapterError {
    if source.is_timeout() {
        AdapterError::Timeout {
            base_url: base_url.to_string(),
            secs: timeout_secs,
        }
    } else {
        AdapterError::Transport {
            base_url: base_url.to_string(),
            source,
        }
    }
}
