use thiserror::Error;

/// The upload could not be turned into PCM samples
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Decoder process could not be started
    #[error("failed to start decoder `{program}`: {message}")]
    Spawn { program: String, message: String },

    /// Decoder ran but rejected the input
    #[error("failed to load audio: {stderr}")]
    Failed { status: Option<i32>, stderr: String },

    /// Pipe to or from the decoder broke
    #[error("decoder I/O failed: {0}")]
    Io(String),

    /// 16-bit PCM must have an even number of bytes
    #[error("PCM data has an odd number of bytes ({0})")]
    MisalignedPcm(usize),
}
