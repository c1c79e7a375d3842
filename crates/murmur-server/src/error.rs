use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use murmur_audio::DecodeError;
use murmur_engine::TranscriptionError;
use murmur_format::FormatError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Request failures with their HTTP status codes
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed query or multipart body
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Language code outside the supported table
    #[error("Unsupported language '{0}'")]
    UnsupportedLanguage(String),

    /// Upload exceeds the configured body limit
    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    /// Requested output format unknown, or encoding failed
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Upload could not be decoded to PCM
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Engine or model backend failed
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),

    /// Internal server error
    /// If Some(message), it can be shown to the caller
    #[error("Internal server error")]
    Internal(Option<String>),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::UnsupportedLanguage(_) | Self::Format(FormatError::Unsupported(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Transcription(_) => StatusCode::BAD_GATEWAY,
            Self::Format(FormatError::Io(_)) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) | Self::UnsupportedLanguage(_) | Self::PayloadTooLarge(_) => {
                "invalid_request_error"
            }
            Self::Format(FormatError::Unsupported(_)) => "unsupported_format_error",
            Self::Decode(_) => "decode_error",
            Self::Transcription(_) => "transcription_error",
            Self::Format(FormatError::Io(_)) | Self::Internal(_) => "internal_error",
        }
    }

    /// Message that is safe to expose to API consumers
    pub fn client_message(&self) -> String {
        match self {
            Self::Internal(Some(message)) => message.clone(),
            Self::Internal(None) | Self::Format(FormatError::Io(_)) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    message: String,
    r#type: String,
    code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        } else {
            tracing::debug!("request rejected: {self}");
        }

        let error_response = ErrorResponse {
            error: ErrorDetails {
                message: self.client_message(),
                r#type: self.error_type().to_string(),
                code: status.as_u16(),
            },
        };

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use murmur_engine::ModelError;

    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (GatewayError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (GatewayError::UnsupportedLanguage("xx".into()), StatusCode::BAD_REQUEST),
            (FormatError::Unsupported("xml".into()).into(), StatusCode::BAD_REQUEST),
            (DecodeError::MisalignedPcm(3).into(), StatusCode::UNPROCESSABLE_ENTITY),
            (
                TranscriptionError::from(ModelError::Connection("down".into())).into(),
                StatusCode::BAD_GATEWAY,
            ),
            (GatewayError::Internal(None), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(error.status_code(), status, "{error}");
        }
    }

    #[test]
    fn internal_details_are_hidden() {
        let error = GatewayError::Format(FormatError::Io(std::io::Error::other("disk on fire")));
        assert_eq!(error.client_message(), "Internal server error");
    }

    #[tokio::test]
    async fn body_carries_type_and_code() {
        let response = GatewayError::Format(FormatError::Unsupported("xml".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["error"]["type"], "unsupported_format_error");
        assert_eq!(body["error"]["code"], 400);
        assert!(body["error"]["message"].as_str().unwrap().contains("xml"));
    }
}
