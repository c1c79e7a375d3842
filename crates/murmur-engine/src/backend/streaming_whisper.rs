use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures_util::{StreamExt, stream};
use murmur_config::EngineConfig;

use crate::{
    error::ModelError,
    model::{LanguageProbabilities, SegmentStream, StreamInfo, StreamingModel},
    types::{DecodeOptions, Segment},
};

use super::{VerboseTranscription, WhisperApi, resolve_language};

/// SSE payload that terminates the stream
const DONE_MARKER: &str = "[DONE]";

/// Generator backend: the server streams `verbose_json` chunks over SSE
///
/// The first chunk carries the detected language; every chunk carries the
/// segments decoded since the previous one.
pub struct StreamingWhisperModel {
    api: WhisperApi,
}

impl StreamingWhisperModel {
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
}

fn parse_chunk(data: &str) -> Result<Option<VerboseTranscription>, ModelError> {
    let data = data.trim();

    if data == DONE_MARKER {
        return Ok(None);
    }

    serde_json::from_str(data)
        .map(Some)
        .map_err(|e| ModelError::InvalidResponse(format!("malformed stream chunk: {e}")))
}

#[async_trait]
impl StreamingModel for StreamingWhisperModel {
    async fn transcribe<'a>(
        &'a mut self,
        samples: &'a [f32],
        options: &'a DecodeOptions,
    ) -> Result<(SegmentStream<'a>, StreamInfo), ModelError> {
        let form = self.api.form(samples, options, true)?;
        let response = self.api.send(options.task, form).await?;

        let mut events = Box::pin(response.bytes_stream().eventsource());

        // The first chunk is read eagerly for the stream info
        let first = match events.next().await {
            Some(Ok(event)) => parse_chunk(&event.data)?,
            Some(Err(e)) => return Err(ModelError::Stream(e.to_string())),
            None => None,
        };

        let (reported, pending) = first.map_or((None, Vec::new()), |chunk| (chunk.language, chunk.segments));
        let language = resolve_language(reported.as_deref(), options.language.as_deref())?;

        tracing::debug!(%language, "segment stream opened");

        let head = stream::iter(pending.into_iter().map(|segment| Ok(Segment::from(segment))));

        let rest = events
            .map(|result| -> Vec<Result<Segment, ModelError>> {
                match result {
                    Ok(event) => match parse_chunk(&event.data) {
                        Ok(Some(chunk)) => chunk.segments.into_iter().map(|s| Ok(Segment::from(s))).collect(),
                        Ok(None) => Vec::new(),
                        Err(e) => vec![Err(e)],
                    },
                    Err(e) => vec![Err(ModelError::Stream(e.to_string()))],
                }
            })
            .flat_map(stream::iter);

        Ok((head.chain(rest).boxed(), StreamInfo { language }))
    }

    async fn detect_language(&mut self, samples: &[f32]) -> Result<LanguageProbabilities, ModelError> {
        let options = DecodeOptions::default();
        let (segments, info) = self.transcribe(samples, &options).await?;

        // The language is known once the stream opens, dropping the stream
        // closes the connection before the server decodes the rest
        drop(segments);

        Ok(vec![(info.language, 1.0)])
    }
}
