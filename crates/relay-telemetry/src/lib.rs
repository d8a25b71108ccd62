//! Logging for the speech relay
//!
//! Installs a `tracing-subscriber` fmt layer filtered by `LOG_LEVEL`

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format of log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Initialize the global subscriber
///
/// `log_level` accepts either a `tracing` directive (`info`,
/// `tts=debug,tower_http=warn`) or one of the level names operators already
/// use for the endpoint (`DEBUG`, `INFO`, `WARNING`, `ERROR`, `CRITICAL`).
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(log_level: &str, format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(log_filter(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(true),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}

/// Translate a `LOG_LEVEL` value into an `EnvFilter` directive
///
/// Unknown bare level names fall back to `info`; anything containing `=` or
/// `,` is passed through as a directive.
pub fn log_filter(log_level: &str) -> String {
    let trimmed = log_level.trim();

    if trimmed.contains('=') || trimmed.contains(',') {
        return trimmed.to_string();
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" | "warning" => "warn",
        "error" | "critical" | "fatal" => "error",
        "off" => "off",
        _ => "info",
    }
    .to_string()
}
