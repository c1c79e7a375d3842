use std::path::Path;

use crate::{Config, DEFAULT_SAMPLE_RATE};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, TOML parsing fails,
    /// or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config = Self::from_toml(&raw)?;

        tracing::debug!(path = %path.display(), engine = %config.engine.kind, "configuration loaded");

        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns an error if TOML parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_engine_config()?;
        self.validate_server_config()?;

        if self.audio.sample_rate != DEFAULT_SAMPLE_RATE {
            anyhow::bail!(
                "audio.sample_rate must be {DEFAULT_SAMPLE_RATE}, got {}",
                self.audio.sample_rate
            );
        }

        Ok(())
    }

    fn validate_engine_config(&self) -> anyhow::Result<()> {
        if self.engine.model.trim().is_empty() {
            anyhow::bail!("engine.model must not be empty");
        }

        if self.engine.beam_size == 0 {
            anyhow::bail!("engine.beam_size must be at least 1");
        }

        if !self.engine.base_url.starts_with("http://") && !self.engine.base_url.starts_with("https://") {
            anyhow::bail!("engine.base_url must be an http(s) URL: `{}`", self.engine.base_url);
        }

        Ok(())
    }

    fn validate_server_config(&self) -> anyhow::Result<()> {
        if !self.server.docs_path.starts_with('/') {
            anyhow::bail!("server.docs_path must start with '/'");
        }

        if self.server.docs_path == "/" {
            anyhow::bail!("server.docs_path cannot be '/', the root redirects to it");
        }

        if self.server.max_upload_bytes == 0 {
            anyhow::bail!("server.max_upload_bytes must be greater than 0");
        }

        Ok(())
    }
}
