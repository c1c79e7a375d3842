use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use murmur_config::{Config, EngineKind};

/// Murmur speech recognition gateway
#[derive(Debug, Parser)]
#[command(name = "murmur", about = "HTTP gateway for Whisper-style speech recognition")]
pub struct Args {
    /// Path to configuration file; built-in defaults apply when omitted
    #[arg(short, long, env = "MURMUR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "MURMUR_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Override the engine variant (`whisper` or `faster_whisper`)
    #[arg(long, env = "ASR_ENGINE")]
    pub engine: Option<EngineKind>,

    /// Override the model identifier
    #[arg(long, env = "ASR_MODEL")]
    pub model: Option<String>,

    /// Override the log filter directive
    #[arg(long, env = "MURMUR_LOG")]
    pub log_filter: Option<String>,
}

impl Args {
    /// Load the configuration file, if any, and apply overrides on top
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(listen) = self.listen {
            config.server.listen_address = Some(listen);
        }

        if let Some(kind) = self.engine {
            config.engine.kind = kind;
        }

        if let Some(model) = &self.model {
            config.engine.model.clone_from(model);
        }

        config.validate()?;

        Ok(config)
    }
}
