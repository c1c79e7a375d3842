//! Transcript serialization
//!
//! Every output format is a [`ResultWriter`] selected through [`OutputFormat`].
//! Parsing the format key happens before any byte is produced, so an unknown
//! format never yields partial output.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod sink;
mod timestamp;
mod writer;

use std::str::FromStr;

use murmur_engine::Transcript;
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub use error::FormatError;
pub use sink::write_to_dir;
pub use timestamp::format_timestamp;
pub use writer::{ResultWriter, WriteJson, WriteSrt, WriteTsv, WriteTxt, WriteVtt};

/// Known output formats, keyed by their file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Txt,
    Vtt,
    Srt,
    Tsv,
    Json,
}

impl OutputFormat {
    /// Parse a format key, failing with [`FormatError::Unsupported`]
    pub fn parse(key: &str) -> Result<Self, FormatError> {
        Self::from_str(key).map_err(|_| FormatError::Unsupported(key.to_string()))
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Vtt => "vtt",
            Self::Srt => "srt",
            Self::Tsv => "tsv",
            Self::Json => "json",
        }
    }

    pub fn writer(self) -> &'static dyn ResultWriter {
        match self {
            Self::Txt => &WriteTxt,
            Self::Vtt => &WriteVtt,
            Self::Srt => &WriteSrt,
            Self::Tsv => &WriteTsv,
            Self::Json => &WriteJson,
        }
    }
}

/// Serialize `transcript` into an in-memory buffer
pub fn encode(transcript: &Transcript, format: OutputFormat) -> Result<Vec<u8>, FormatError> {
    let mut out = Vec::new();
    format.writer().write_result(transcript, &mut out)?;
    Ok(out)
}

/// Like [`encode`], with the format given by its key
pub fn encode_as(transcript: &Transcript, key: &str) -> Result<Vec<u8>, FormatError> {
    encode(transcript, OutputFormat::parse(key)?)
}
