use axum::extract::{FromRequest, FromRequestParts, Multipart, Query, multipart::MultipartError};
use http::{StatusCode, request::Parts};
use murmur_engine::{Task, TranscriptionOptions, language};
use murmur_format::OutputFormat;
use serde::{Deserialize, de::DeserializeOwned};

use crate::error::{GatewayError, Result};

/// Multipart field carrying the audio
const AUDIO_FIELD: &str = "audio_file";

/// Name used when the upload carries no filename
const DEFAULT_FILENAME: &str = "audio";

fn default_encode() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct AsrQuery {
    #[serde(default)]
    task: Task,
    language: Option<String>,
    initial_prompt: Option<String>,
    #[serde(default = "default_encode")]
    encode: bool,
    output: Option<String>,
    #[serde(default)]
    word_timestamps: bool,
}

#[derive(Debug, Deserialize)]
struct DetectQuery {
    #[serde(default = "default_encode")]
    encode: bool,
}

fn parse_query<T: DeserializeOwned>(parts: &Parts) -> Result<T> {
    Query::<T>::try_from_uri(&parts.uri)
        .map(|Query(query)| query)
        .map_err(|e| GatewayError::InvalidRequest(e.body_text()))
}

/// Validated `/asr` query parameters
#[derive(Debug)]
pub(crate) struct AsrParams {
    pub options: TranscriptionOptions,
    pub encode: bool,
    pub output: OutputFormat,
}

/// Extractor for `/asr` parameters
///
/// Runs before the body is read, so a bad format or language is rejected
/// without consuming the upload.
pub(crate) struct ExtractAsrParams(pub AsrParams);

impl<S> FromRequestParts<S> for ExtractAsrParams
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        let query: AsrQuery = parse_query(parts)?;

        let output = match query.output.as_deref() {
            Some(key) => OutputFormat::parse(key)?,
            None => OutputFormat::default(),
        };

        let language = query.language.filter(|l| !l.is_empty());

        if let Some(code) = &language
            && !language::is_supported(code)
        {
            return Err(GatewayError::UnsupportedLanguage(code.clone()));
        }

        Ok(Self(AsrParams {
            options: TranscriptionOptions {
                task: query.task,
                language,
                initial_prompt: query.initial_prompt,
                word_timestamps: Some(query.word_timestamps),
            },
            encode: query.encode,
            output,
        }))
    }
}

/// Extractor for `/detect-language` parameters
pub(crate) struct ExtractDetectParams {
    pub encode: bool,
}

impl<S> FromRequestParts<S> for ExtractDetectParams
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        let query: DetectQuery = parse_query(parts)?;

        Ok(Self { encode: query.encode })
    }
}

/// Uploaded audio file
#[derive(Debug)]
pub(crate) struct AudioUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Extractor for the `audio_file` multipart field
pub(crate) struct ExtractUpload(pub AudioUpload);

impl<S> FromRequest<S> for ExtractUpload
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request(request: axum::extract::Request, state: &S) -> Result<Self> {
        let content_type = request
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("multipart/form-data") {
            return Err(GatewayError::InvalidRequest(
                "Unsupported Content-Type, expected: 'Content-Type: multipart/form-data'".to_string(),
            ));
        }

        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| GatewayError::InvalidRequest(format!("Failed to parse multipart form: {}", e.body_text())))?;

        let mut upload = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some(AUDIO_FIELD) {
                continue;
            }

            let filename = field
                .file_name()
                .filter(|name| !name.is_empty())
                .unwrap_or(DEFAULT_FILENAME)
                .to_string();

            let bytes = field.bytes().await.map_err(multipart_error)?;

            upload = Some(AudioUpload {
                bytes: bytes.to_vec(),
                filename,
            });
        }

        upload
            .map(Self)
            .ok_or_else(|| GatewayError::InvalidRequest(format!("Missing required '{AUDIO_FIELD}' field in multipart form")))
    }
}

fn multipart_error(error: MultipartError) -> GatewayError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        GatewayError::PayloadTooLarge(error.body_text())
    } else {
        GatewayError::InvalidRequest(format!("Failed to read multipart form: {}", error.body_text()))
    }
}
