#![allow(clippy::must_use_candidate)]

pub mod audio;
pub mod engine;
pub mod health;
mod loader;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use audio::*;
pub use engine::*;
pub use health::*;
pub use server::*;
pub use telemetry::*;

/// Top-level Murmur configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Transcription engine and model backend
    #[serde(default)]
    pub engine: EngineConfig,
    /// Audio normalization settings
    #[serde(default)]
    pub audio: AudioConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
