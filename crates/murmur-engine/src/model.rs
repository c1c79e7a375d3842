use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::{
    error::ModelError,
    types::{DecodeOptions, Segment},
};

/// Candidate languages with their probabilities, in backend order
pub type LanguageProbabilities = Vec<(String, f32)>;

/// Lazily produced segments of a streaming transcription
///
/// Borrows the model, so it can only be consumed while the model is held.
pub type SegmentStream<'a> = BoxStream<'a, Result<Segment, ModelError>>;

/// Complete output of a full-pass model call
#[derive(Debug, Clone)]
pub struct BatchOutput {
    /// Requested or detected language code
    pub language: String,
    /// Every decoded segment in temporal order
    pub segments: Vec<Segment>,
    /// Full text as reported by the model, if it reports one
    pub text: Option<String>,
}

/// Side-channel information that precedes a segment stream
#[derive(Debug, Clone)]
pub struct StreamInfo {
    /// Detected language code
    pub language: String,
}

/// A model that decodes the whole input before returning
#[async_trait]
pub trait BatchModel: Send + Sync {
    /// Transcribe 16 kHz mono samples in one pass
    async fn transcribe(&mut self, samples: &[f32], options: &DecodeOptions) -> Result<BatchOutput, ModelError>;

    /// Score candidate languages for a 30 second window
    async fn detect_language(&mut self, samples: &[f32]) -> Result<LanguageProbabilities, ModelError>;
}

/// A model that yields segments while decoding
#[async_trait]
pub trait StreamingModel: Send + Sync {
    /// Start transcribing, returning the stream info and the pending segments
    async fn transcribe<'a>(
        &'a mut self,
        samples: &'a [f32],
        options: &'a DecodeOptions,
    ) -> Result<(SegmentStream<'a>, StreamInfo), ModelError>;

    /// Score candidate languages for a 30 second window
    async fn detect_language(&mut self, samples: &[f32]) -> Result<LanguageProbabilities, ModelError>;
}
