use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    num::NonZeroU64,
    path::PathBuf,
};

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use relay_config::Config;

/// Speech relay
#[derive(Debug, Parser)]
#[command(
    name = "speech-relay",
    version,
    about = "Text-to-speech relay: accent normalization, neural synthesis, MP3 transcoding",
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options for `serve`, which also runs when no subcommand is given
    #[command(flatten)]
    pub serve: ServeArgs,

    /// Log level name (`DEBUG`, `INFO`, `WARNING`, ...) or filter directive
    #[arg(long, global = true, default_value = "INFO", env = "LOG_LEVEL")]
    pub log_level: String,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text, env = "LOG_FORMAT")]
    pub log_format: LogFormat,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the synthesis endpoint
    Serve(ServeArgs),
    /// Synthesize text through a running endpoint and save the MP3
    Say(SayArgs),
}

#[derive(Debug, Clone, Default, ClapArgs)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, env = "SPEECH_RELAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen port
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Override the listen address
    #[arg(long, env = "SPEECH_RELAY_LISTEN", conflicts_with = "port")]
    pub listen: Option<SocketAddr>,

    /// Override the synthesis model path
    #[arg(long, env = "MODEL_PATH")]
    pub model_path: Option<PathBuf>,
}

impl ServeArgs {
    /// Load the configuration file, if any, and apply command-line overrides
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load_or_default(self.config.as_deref())?;

        if let Some(listen) = self.listen {
            config.server.listen_address = Some(listen);
        } else if let Some(port) = self.port {
            let ip = config
                .server
                .listen_address
                .map_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED), |addr| addr.ip());
            config.server.listen_address = Some(SocketAddr::new(ip, port));
        }

        if let Some(ref model_path) = self.model_path {
            config.synthesis.model_path.clone_from(model_path);
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, ClapArgs)]
pub struct SayArgs {
    /// Text to synthesize
    pub text: String,

    /// Endpoint base URL; falls back to `[adapter].base_url` in the config file
    #[arg(long, env = "TTS_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<NonZeroU64>,

    /// Where to write the audio
    #[arg(short, long, default_value = "speech.mp3")]
    pub output: PathBuf,

    /// Path to configuration file
    #[arg(short, long, env = "SPEECH_RELAY_CONFIG")]
    pub config: Option<PathBuf>,
}

impl SayArgs {
    /// Resolve the adapter configuration from flags and the config file
    pub fn adapter_config(&self) -> anyhow::Result<relay_config::AdapterConfig> {
        let mut adapter = match self.base_url {
            Some(ref base_url) => relay_config::AdapterConfig::new(base_url.as_str()),
            None => Config::load_or_default(self.config.as_deref())?
                .adapter
                .ok_or_else(|| anyhow::anyhow!("no endpoint configured: pass --base-url or set [adapter] in the config"))?,
        };

        if let Some(timeout) = self.timeout {
            adapter = adapter.with_timeout(timeout);
        }

        Ok(adapter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl From<LogFormat> for relay_telemetry::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Text => Self::Text,
            LogFormat::Json => Self::Json,
        }
    }
}
