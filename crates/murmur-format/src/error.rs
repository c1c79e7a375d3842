use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    /// Key is not one of the known output formats
    #[error("unsupported output format `{0}`, expected one of txt, vtt, srt, tsv, json")]
    Unsupported(String),

    /// Sink rejected the write
    #[error("failed to write transcript: {0}")]
    Io(#[from] std::io::Error),
}
