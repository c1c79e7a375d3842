//! Model backends served by an OpenAI-compatible Whisper inference server

pub(crate) mod streaming_whisper;
mod wav;
pub(crate) mod whisper;

use std::time::Duration;

use murmur_config::EngineConfig;
use reqwest::{Client, Response, multipart::Form};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{
    error::ModelError,
    language,
    types::{DecodeOptions, Segment, Task},
};

pub use streaming_whisper::StreamingWhisperModel;
pub use whisper::WhisperHttpModel;

/// Connection to the inference server shared by both backends
pub(crate) struct WhisperApi {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    model: String,
    beam_size: u32,
    sample_rate: u32,
}

impl WhisperApi {
    pub fn new(config: &EngineConfig, sample_rate: u32) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_idle_timeout(Some(Duration::from_secs(5)))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| ModelError::Connection(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            beam_size: config.beam_size,
            sample_rate,
        })
    }

    fn endpoint(&self, task: Task) -> String {
        match task {
            Task::Transcribe => format!("{}/audio/transcriptions", self.base_url),
            Task::Translate => format!("{}/audio/translations", self.base_url),
        }
    }

    /// Build the multipart form for one decoding pass
    ///
    /// Only options that are set become form fields.
    pub fn form(&self, samples: &[f32], options: &DecodeOptions, stream: bool) -> Result<Form, ModelError> {
        let audio = wav::encode(samples, self.sample_rate)?;

        let part = reqwest::multipart::Part::bytes(audio)
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| ModelError::InvalidRequest(format!("invalid content type: {e}")))?;

        let mut form = Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .text("beam_size", self.beam_size.to_string());

        if let Some(language) = &options.language {
            form = form.text("language", language.clone());
        }

        if let Some(prompt) = &options.initial_prompt {
            form = form.text("prompt", prompt.clone());
        }

        if options.word_timestamps == Some(true) {
            form = form
                .text("timestamp_granularities[]", "segment")
                .text("timestamp_granularities[]", "word");
        }

        if stream {
            form = form.text("stream", "true");
        }

        Ok(form)
    }

    /// Send a decoding request and check the response status
    pub async fn send(&self, task: Task, form: Form) -> Result<Response, ModelError> {
        let url = self.endpoint(task);

        tracing::debug!(url = %url, model = %self.model, "sending decoding request");

        let mut builder = self.client.post(&url).multipart(form);

        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("model backend request failed: {e}");
            ModelError::Connection(format!("failed to reach model backend: {e}"))
        })?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("model backend error ({status}): {message}");

            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

/// `verbose_json` transcription body, also used for each streamed chunk
#[derive(Debug, Deserialize)]
pub(crate) struct VerboseTranscription {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub segments: Vec<WireSegment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl From<WireSegment> for Segment {
    fn from(wire: WireSegment) -> Self {
        Self::new(wire.start, wire.end, wire.text)
    }
}

/// Normalize a reported language (code or English name) to a code
///
/// Falls back to the requested language when the backend reports none.
pub(crate) fn resolve_language(reported: Option<&str>, requested: Option<&str>) -> Result<String, ModelError> {
    match (reported, requested) {
        (Some(reported), _) => Ok(language::language_code(reported)
            .map_or_else(|| reported.trim().to_lowercase(), str::to_string)),
        (None, Some(requested)) => Ok(requested.to_string()),
        (None, None) => Err(ModelError::InvalidResponse("backend did not report a language".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_names_become_codes() {
        assert_eq!(resolve_language(Some("english"), None).unwrap(), "en");
        assert_eq!(resolve_language(Some("fr"), Some("de")).unwrap(), "fr");
    }

    #[test]
    fn unknown_language_is_passed_through() {
        assert_eq!(resolve_language(Some("Quenya"), None).unwrap(), "quenya");
    }

    #[test]
    fn requested_language_fills_gaps() {
        assert_eq!(resolve_language(None, Some("it")).unwrap(), "it");
        assert!(resolve_language(None, None).is_err());
    }

    #[test]
    fn endpoints_follow_the_task() {
        let config = EngineConfig {
            base_url: "http://localhost:8000/v1/".to_string(),
            ..EngineConfig::default()
        };
        let api = WhisperApi::new(&config, 16_000).unwrap();

        assert_eq!(api.endpoint(Task::Transcribe), "http://localhost:8000/v1/audio/transcriptions");
        assert_eq!(api.endpoint(Task::Translate), "http://localhost:8000/v1/audio/translations");
    }
}
