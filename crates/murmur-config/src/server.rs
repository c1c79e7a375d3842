use std::net::SocketAddr;

use serde::Deserialize;

use crate::health::HealthConfig;

/// Default upload limit (100 MiB)
const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 << 20;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    #[serde(default)]
    pub health: HealthConfig,
    /// Path of the API documentation page that `/` redirects to
    #[serde(default = "default_docs_path")]
    pub docs_path: String,
    /// Largest accepted multipart body
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            health: HealthConfig::default(),
            docs_path: default_docs_path(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn default_docs_path() -> String {
    "/docs".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}
