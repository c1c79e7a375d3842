use serde::{Deserialize, Serialize};

/// One timed span of recognized speech
///
/// Offsets are seconds from the start of the audio. Text is kept exactly as
/// the model produced it, surrounding whitespace included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSegment")]
pub struct Segment {
    start: f64,
    end: f64,
    text: String,
}

impl Segment {
    /// Create a segment, clamping offsets so that `end >= start >= 0`
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        let start = start.max(0.0);
        let end = end.max(start);

        Self {
            start,
            end,
            text: text.into(),
        }
    }

    pub const fn start(&self) -> f64 {
        self.start
    }

    pub const fn end(&self) -> f64 {
        self.end
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Deserialize)]
struct RawSegment {
    start: f64,
    end: f64,
    text: String,
}

impl From<RawSegment> for Segment {
    fn from(raw: RawSegment) -> Self {
        Self::new(raw.start, raw.end, raw.text)
    }
}

/// Outcome of one transcription call
///
/// `text` is always the in-order concatenation of the segment texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTranscript")]
pub struct Transcript {
    language: String,
    segments: Vec<Segment>,
    text: String,
}

impl Transcript {
    /// Assemble a transcript from segments in temporal order
    pub fn from_segments(language: impl Into<String>, segments: Vec<Segment>) -> Self {
        let mut builder = TranscriptBuilder::default();
        for segment in segments {
            builder.push(segment);
        }
        builder.finish(language)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Accumulates segments and their concatenated text as they are produced
#[derive(Debug, Default)]
pub struct TranscriptBuilder {
    segments: Vec<Segment>,
    text: String,
}

impl TranscriptBuilder {
    pub fn push(&mut self, segment: Segment) {
        self.text.push_str(&segment.text);
        self.segments.push(segment);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn finish(self, language: impl Into<String>) -> Transcript {
        Transcript {
            language: language.into(),
            segments: self.segments,
            text: self.text,
        }
    }
}

#[derive(Deserialize)]
struct RawTranscript {
    language: String,
    segments: Vec<Segment>,
    text: String,
}

impl TryFrom<RawTranscript> for Transcript {
    type Error = String;

    fn try_from(raw: RawTranscript) -> Result<Self, Self::Error> {
        let transcript = Self::from_segments(raw.language, raw.segments);

        if transcript.text != raw.text {
            return Err("transcript text does not match the concatenated segment texts".to_string());
        }

        Ok(transcript)
    }
}

/// Decoding task
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Task {
    /// Text in the spoken language
    #[default]
    Transcribe,
    /// Text translated to English
    Translate,
}

/// Request-scoped decoding configuration as supplied by the caller
#[derive(Debug, Clone, Default)]
pub struct TranscriptionOptions {
    pub task: Task,
    /// Language override; detected by the model when absent
    pub language: Option<String>,
    /// Text used to bias decoding
    pub initial_prompt: Option<String>,
    /// Request per-word timing from engines that support it
    pub word_timestamps: Option<bool>,
}

/// Options as handed to a model backend
///
/// Unset and empty values are `None` so that backends never send them.
/// `word_timestamps` is only ever `Some(true)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub task: Task,
    pub language: Option<String>,
    pub initial_prompt: Option<String>,
    pub word_timestamps: Option<bool>,
}

impl From<&TranscriptionOptions> for DecodeOptions {
    fn from(options: &TranscriptionOptions) -> Self {
        Self {
            task: options.task,
            language: non_empty(options.language.as_deref()),
            initial_prompt: non_empty(options.initial_prompt.as_deref()),
            word_timestamps: options.word_timestamps.filter(|enabled| *enabled),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
