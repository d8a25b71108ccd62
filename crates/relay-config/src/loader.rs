use std::path::Path;

use crate::{AccentConfig, Config};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Load the file when a path is given, otherwise fall back to defaults
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`Config::load`]
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("no config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server()?;
        self.validate_synthesis()?;
        self.validate_accent()?;
        self.validate_transcoder()?;
        self.validate_patches()?;
        self.validate_adapter()?;
        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        if health.enabled && (!health.path.starts_with('/') || health.path.starts_with("/synthesize")) {
            anyhow::bail!("server.health.path must start with '/' and not shadow /synthesize");
        }

        Ok(())
    }

    fn validate_synthesis(&self) -> anyhow::Result<()> {
        let synthesis = &self.synthesis;

        if synthesis.program.trim().is_empty() {
            anyhow::bail!("synthesis.program must not be empty");
        }

        if !synthesis.length_scale.is_finite() || synthesis.length_scale <= 0.0 {
            anyhow::bail!("synthesis.length_scale must be a positive number");
        }

        if !synthesis.trailing_silence_secs.is_finite() || synthesis.trailing_silence_secs < 0.0 {
            anyhow::bail!("synthesis.trailing_silence_secs must not be negative");
        }

        Ok(())
    }

    fn validate_accent(&self) -> anyhow::Result<()> {
        if let AccentConfig::Command { ref program, .. } = self.accent
            && program.trim().is_empty()
        {
            anyhow::bail!("accent.program must not be empty");
        }

        Ok(())
    }

    fn validate_transcoder(&self) -> anyhow::Result<()> {
        let transcoder = &self.transcoder;

        if transcoder.program.trim().is_empty() {
            anyhow::bail!("transcoder.program must not be empty");
        }

        if transcoder.codec.trim().is_empty() || transcoder.quality.trim().is_empty() {
            anyhow::bail!("transcoder.codec and transcoder.quality must not be empty");
        }

        Ok(())
    }

    fn validate_patches(&self) -> anyhow::Result<()> {
        if self.patches.keys().any(String::is_empty) {
            anyhow::bail!("patches must not contain an empty phrase");
        }

        Ok(())
    }

    fn validate_adapter(&self) -> anyhow::Result<()> {
        let Some(ref adapter) = self.adapter else {
            return Ok(());
        };

        // An empty base URL is tolerated here; the adapter reports it on every call
        if !adapter.base_url.is_empty() {
            url::Url::parse(&adapter.base_url)
                .map_err(|e| anyhow::anyhow!("adapter.base_url is not a valid URL: {e}"))?;
        }

        Ok(())
    }
}
