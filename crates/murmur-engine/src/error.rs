use thiserror::Error;

pub type Result<T> = std::result::Result<T, TranscriptionError>;

/// Failure of a transcription or language detection call
///
/// Carries the root cause from the model backend unchanged. Nothing is
/// retried.
#[derive(Debug, Error)]
pub enum TranscriptionError {
    /// The model backend failed
    #[error("transcription failed: {0}")]
    Model(#[from] ModelError),

    /// The detection pass returned no candidate language
    #[error("language detection returned no candidates")]
    NoLanguage,
}

/// Errors raised by a model backend
#[derive(Debug, Error)]
pub enum ModelError {
    /// Backend could not be reached
    #[error("connection error: {0}")]
    Connection(String),

    /// Backend answered with a non-success status
    #[error("backend error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Request could not be built
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Backend answered with something that is not a transcription
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Segment stream broke off
    #[error("stream error: {0}")]
    Stream(String),
}
