use async_trait::async_trait;
use murmur_config::EngineConfig;

use crate::{
    error::ModelError,
    model::{BatchModel, BatchOutput, LanguageProbabilities},
    types::{DecodeOptions, Segment},
};

use super::{VerboseTranscription, WhisperApi, resolve_language};

/// Full-pass backend: one request returns the complete `verbose_json` result
pub struct WhisperHttpModel {
    api: WhisperApi,
}

impl WhisperHttpModel {
    /// Connect to the inference server described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &EngineConfig, sample_rate: u32) -> Result<Self, ModelError> {
        Ok(Self {
            api: WhisperApi::new(config, sample_rate)?,
        })
    }

    async fn run(&self, samples: &[f32], options: &DecodeOptions) -> Result<VerboseTranscription, ModelError> {
        let form = self.api.form(samples, options, false)?;
        let response = self.api.send(options.task, form).await?;

        response.json::<VerboseTranscription>().await.map_err(|e| {
            tracing::error!("failed to parse transcription response: {e}");
            ModelError::InvalidResponse(format!("malformed transcription body: {e}"))
        })
    }
}

#[async_trait]
impl BatchModel for WhisperHttpModel {
    async fn transcribe(&mut self, samples: &[f32], options: &DecodeOptions) -> Result<BatchOutput, ModelError> {
        let body = self.run(samples, options).await?;

        let language = resolve_language(body.language.as_deref(), options.language.as_deref())?;
        let segments: Vec<Segment> = body.segments.into_iter().map(Segment::from).collect();

        tracing::debug!(segments = segments.len(), %language, "batch transcription received");

        Ok(BatchOutput {
            language,
            segments,
            text: body.text,
        })
    }

    async fn detect_language(&mut self, samples: &[f32]) -> Result<LanguageProbabilities, ModelError> {
        let body = self.run(samples, &DecodeOptions::default()).await?;
        let language = resolve_language(body.language.as_deref(), None)?;

        Ok(vec![(language, 1.0)])
    }
}
