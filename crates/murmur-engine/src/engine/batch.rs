use async_trait::async_trait;

use crate::{
    error::{Result, TranscriptionError},
    gate::ModelGate,
    model::{BatchModel, BatchOutput},
    types::{DecodeOptions, Transcript, TranscriptionOptions},
};

use super::{DETECTION_WINDOW_SAMPLES, TranscriptionEngine, most_probable, pad_or_trim};

/// Engine over a model that returns every segment in one call
pub struct BatchEngine<M> {
    name: String,
    gate: ModelGate<M>,
}

impl<M: BatchModel> BatchEngine<M> {
    pub fn new(name: impl Into<String>, gate: ModelGate<M>) -> Self {
        Self {
            name: name.into(),
            gate,
        }
    }
}

#[async_trait]
impl<M: BatchModel + 'static> TranscriptionEngine for BatchEngine<M> {
    async fn transcribe(&self, samples: &[f32], options: &TranscriptionOptions) -> Result<Transcript> {
        let decode = DecodeOptions::from(options);

        tracing::info!(
            engine = %self.name,
            task = %decode.task,
            language = ?decode.language,
            initial_prompt = ?decode.initial_prompt,
            word_timestamps = decode.word_timestamps.unwrap_or(false),
            samples = samples.len(),
            "transcribing"
        );

        let mut model = self.gate.lock().await;
        let output = model.transcribe(samples, &decode).await?;
        let transcript = assemble(&self.name, output);
        drop(model);

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
        true
    }
}

fn assemble(engine: &str, output: BatchOutput) -> Transcript {
    let BatchOutput { language, segments, text } = output;
    let transcript = Transcript::from_segments(language, segments);

    if let Some(reported) = text
        && reported != transcript.text()
    {
        tracing::debug!(engine, "model text differs from segment texts, keeping segment concatenation");
    }

    transcript
}
