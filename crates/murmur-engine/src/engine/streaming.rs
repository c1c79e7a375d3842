use async_trait::async_trait;
use futures_util::StreamExt;

use crate::{
    error::{Result, TranscriptionError},
    gate::ModelGate,
    model::StreamingModel,
    types::{DecodeOptions, Transcript, TranscriptBuilder, TranscriptionOptions},
};

use super::{DETECTION_WINDOW_SAMPLES, TranscriptionEngine, most_probable, pad_or_trim};

/// Engine over a model that yields segments lazily
///
/// The segment stream borrows the model, so it is drained completely while
/// the gate is held and the transcript is assembled before it is released.
pub struct StreamingEngine<M> {
    name: String,
    gate: ModelGate<M>,
}

impl<M: StreamingModel> StreamingEngine<M> {
    pub fn new(name: impl Into<String>, gate: ModelGate<M>) -> Self {
        Self {
            name: name.into(),
            gate,
        }
    }
}

#[async_trait]
impl<M: StreamingModel + 'static> TranscriptionEngine for StreamingEngine<M> {
    async fn transcribe(&self, samples: &[f32], options: &TranscriptionOptions) -> Result<Transcript> {
        let mut decode = DecodeOptions::from(options);

        if decode.word_timestamps.take().is_some() {
            tracing::debug!(engine = %self.name, "word timestamps are not supported by this engine, ignoring");
        }

        tracing::info!(
            engine = %self.name,
            task = %decode.task,
            language = ?decode.language,
            initial_prompt = ?decode.initial_prompt,
            samples = samples.len(),
            "transcribing"
        );

        let mut guard = self.gate.lock().await;
        let model = &mut *guard;

        let (mut segments, info) = model.transcribe(samples, &decode).await?;

        let mut builder = TranscriptBuilder::default();
        while let Some(segment) = segments.next().await {
            builder.push(segment?);
        }
        drop(segments);

        // An explicit request labels the output even if the model heard otherwise
        let language = decode.language.unwrap_or(info.language);
        let transcript = builder.finish(language);
        drop(guard);

        tracing::debug!(
            engine = %self.name,
            segments = transcript.segments().len(),
            language = transcript.language(),
            "transcription assembled"
        );

        Ok(transcript)
    }

    async fn detect_language(&self, samples: &[f32]) -> Result<String> {
        tracing::info!(engine = %self.name, "detecting language");

        let window = pad_or_trim(samples, DETECTION_WINDOW_SAMPLES);

        let candidates = {
            let mut model = self.gate.lock().await;
            model.detect_language(&window).await?
        };

        let code = most_probable(&candidates).ok_or(TranscriptionError::NoLanguage)?;

        tracing::info!(engine = %self.name, language = %code, "detected language");

        Ok(code)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn supports_word_timestamps(&self) -> bool {
        false
    }
}
