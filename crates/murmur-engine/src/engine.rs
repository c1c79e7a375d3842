pub(crate) mod batch;
pub(crate) mod streaming;

use std::borrow::Cow;

use async_trait::async_trait;

pub use batch::BatchEngine;
pub use streaming::StreamingEngine;

use crate::{
    error::Result,
    model::LanguageProbabilities,
    types::{Transcript, TranscriptionOptions},
};

/// Samples in the 30 second window language detection runs on (16 kHz)
pub const DETECTION_WINDOW_SAMPLES: usize = 30 * 16_000;

/// Uniform contract over the engine variants
///
/// Implementations hold the model behind a [`crate::ModelGate`] and keep it
/// for the whole model interaction, so calls on one engine never overlap.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Transcribe 16 kHz mono samples into a complete transcript
    async fn transcribe(&self, samples: &[f32], options: &TranscriptionOptions) -> Result<Transcript>;

    /// Return the most probable language code of the first 30 seconds
    async fn detect_language(&self, samples: &[f32]) -> Result<String>;

    /// Engine name reported to clients
    fn name(&self) -> &str;

    /// Whether per-word timing requests reach the model
    fn supports_word_timestamps(&self) -> bool;
}

/// Zero-pad or truncate `samples` to exactly `length`
pub fn pad_or_trim(samples: &[f32], length: usize) -> Cow<'_, [f32]> {
    if samples.len() == length {
        return Cow::Borrowed(samples);
    }

    if samples.len() > length {
        return Cow::Borrowed(&samples[..length]);
    }

    let mut padded = Vec::with_capacity(length);
    padded.extend_from_slice(samples);
    padded.resize(length, 0.0);
    Cow::Owned(padded)
}

/// Pick the highest-probability language
///
/// When several candidates share the maximum, the first one in backend order
/// wins.
pub fn most_probable(candidates: &LanguageProbabilities) -> Option<String> {
    let mut best: Option<&(String, f32)> = None;

    for candidate in candidates {
        match best {
            Some((_, probability)) if candidate.1 <= *probability => {}
            _ => best = Some(candidate),
        }
    }

    best.map(|(code, _)| code.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_is_padded() {
        let window = pad_or_trim(&[0.5, -0.5], 4);
        assert_eq!(&*window, &[0.5, -0.5, 0.0, 0.0]);
    }

    #[test]
    fn long_input_is_trimmed() {
        let window = pad_or_trim(&[0.1, 0.2, 0.3], 2);
        assert!(matches!(window, Cow::Borrowed(_)));
        assert_eq!(&*window, &[0.1, 0.2]);
    }

    #[test]
    fn exact_input_is_borrowed() {
        let samples = vec![0.0; 8];
        assert!(matches!(pad_or_trim(&samples, 8), Cow::Borrowed(_)));
    }

    #[test]
    fn highest_probability_wins() {
        let candidates = vec![
            ("en".to_string(), 0.1),
            ("de".to_string(), 0.7),
            ("fr".to_string(), 0.2),
        ];
        assert_eq!(most_probable(&candidates).as_deref(), Some("de"));
    }

    #[test]
    fn first_maximum_wins_ties() {
        let candidates = vec![
            ("fr".to_string(), 0.2),
            ("en".to_string(), 0.4),
            ("de".to_string(), 0.4),
        ];
        assert_eq!(most_probable(&candidates).as_deref(), Some("en"));
    }

    #[test]
    fn no_candidates() {
        assert_eq!(most_probable(&Vec::new()), None);
    }
}
