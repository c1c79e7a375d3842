//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use murmur_config::{Config, EngineConfig, EngineKind, HealthConfig, ServerConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Drive the given engine variant against a mock backend
    pub fn with_engine(mut self, kind: EngineKind, base_url: &str) -> Self {
        self.config.engine = EngineConfig {
            kind,
            model: "base".to_owned(),
            base_url: base_url.to_owned(),
            timeout_secs: 30,
            ..EngineConfig::default()
        };
        self
    }

    /// Set the multipart body limit
    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.config.server.max_upload_bytes = limit;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
