use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use http::{HeaderName, HeaderValue, header};
use murmur_engine::language;
use serde::Serialize;

use crate::{
    error::{GatewayError, Result},
    request::{ExtractAsrParams, ExtractDetectParams, ExtractUpload},
    state::AppState,
};

/// Response header naming the engine that produced the transcript
const ASR_ENGINE_HEADER: &str = "asr-engine";

#[derive(Debug, Serialize)]
pub(crate) struct DetectedLanguage {
    detected_language: String,
    language_code: String,
}

/// Run engine work on its own task
///
/// The model call is not cancelled when the client goes away; the gate is
/// released only once the engine returns.
async fn detached<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: Future<Output = murmur_engine::Result<T>> + Send + 'static,
{
    tokio::spawn(work)
        .await
        .map_err(|e| {
            tracing::error!("engine task failed: {e}");
            GatewayError::Internal(None)
        })?
        .map_err(GatewayError::from)
}

/// Keep the filename usable inside a quoted header parameter
fn header_safe(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if (c == ' ' || c.is_ascii_graphic()) && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Transcribe or translate an upload into the requested output format
pub(crate) async fn asr(
    State(state): State<Arc<AppState>>,
    ExtractAsrParams(params): ExtractAsrParams,
    ExtractUpload(upload): ExtractUpload,
) -> Result<Response> {
    tracing::info!(
        task = %params.options.task,
        language = ?params.options.language,
        initial_prompt = ?params.options.initial_prompt,
        audio_file = %upload.filename,
        output = %params.output,
        "ASR request received"
    );

    let samples = state
        .normalizer
        .normalize(upload.bytes, params.encode, state.sample_rate)
        .await?;

    let engine = Arc::clone(&state.engine);
    let options = params.options;
    let transcript = detached(async move { engine.transcribe(&samples, &options).await }).await?;

    let body = murmur_format::encode(&transcript, params.output)?;

    tracing::info!(output = %params.output, length = body.len(), "ASR result encoded");

    let disposition = format!(
        "attachment; filename=\"{}.{}\"",
        header_safe(&upload.filename),
        params.output.extension()
    );

    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static("text/plain")),
        (HeaderName::from_static(ASR_ENGINE_HEADER), header_value(state.engine.name())?),
        (header::CONTENT_DISPOSITION, header_value(&disposition)?),
    ];

    Ok((headers, body).into_response())
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| {
        tracing::error!("invalid response header value `{value}`: {e}");
        GatewayError::Internal(None)
    })
}

/// Report the most probable spoken language of an upload
pub(crate) async fn detect_language(
    State(state): State<Arc<AppState>>,
    params: ExtractDetectParams,
    ExtractUpload(upload): ExtractUpload,
) -> Result<Json<DetectedLanguage>> {
    tracing::info!(audio_file = %upload.filename, "language detection request received");

    let samples = state
        .normalizer
        .normalize(upload.bytes, params.encode, state.sample_rate)
        .await?;

    let engine = Arc::clone(&state.engine);
    let code = detached(async move { engine.detect_language(&samples).await }).await?;

    let detected_language = language::language_name(&code).map_or_else(|| code.clone(), str::to_string);

    tracing::info!(language_code = %code, "language detected");

    Ok(Json(DetectedLanguage {
        detected_language,
        language_code: code,
    }))
}
