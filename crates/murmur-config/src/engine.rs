use secrecy::SecretString;
use serde::Deserialize;

/// Default base URL of the inference server (OpenAI-compatible)
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000/v1";

/// Transcription engine configuration
///
/// Read once at startup. The selected engine and model stay fixed for the
/// lifetime of the process.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Which engine variant drives the model
    #[serde(default)]
    pub kind: EngineKind,
    /// Model identifier or size (e.g. "base", "large-v3")
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the model backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key sent to the model backend
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Beam width requested from the decoder
    #[serde(default = "default_beam_size")]
    pub beam_size: u32,
    /// Upper bound on a single backend call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kind: EngineKind::default(),
            model: default_model(),
            base_url: default_base_url(),
            api_key: None,
            beam_size: default_beam_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Supported engine variants
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EngineKind {
    /// Full-pass engine, the backend returns every segment at once
    #[default]
    Whisper,
    /// Generator engine, the backend streams segments as they are decoded
    FasterWhisper,
}

fn default_model() -> String {
    "base".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_beam_size() -> u32 {
    5
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    600
}
