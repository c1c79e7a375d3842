use std::io::{self, Write};

use murmur_engine::Transcript;

use crate::timestamp::{format_timestamp, to_millis};

/// Serializes a transcript into one output format
///
/// Writers are stateless; segments are emitted in order, exactly once.
pub trait ResultWriter: Send + Sync {
    fn write_result(&self, transcript: &Transcript, out: &mut dyn Write) -> io::Result<()>;
}

/// Keep `-->` out of cue text so it cannot be read as a timing line
fn escape_arrow(text: &str) -> String {
    text.replace("-->", "->")
}

/// Plain text, one trimmed segment per line
pub struct WriteTxt;

impl ResultWriter for WriteTxt {
    fn write_result(&self, transcript: &Transcript, out: &mut dyn Write) -> io::Result<()> {
        for segment in transcript.segments() {
            writeln!(out, "{}", segment.text().trim())?;
        }

        Ok(())
    }
}

/// WebVTT cues with `.` milliseconds, hours only when needed
pub struct WriteVtt;

impl ResultWriter for WriteVtt {
    fn write_result(&self, transcript: &Transcript, out: &mut dyn Write) -> io::Result<()> {
        write!(out, "WEBVTT\n\n")?;

        for segment in transcript.segments() {
            write!(
                out,
                "{} --> {}\n{}\n\n",
                format_timestamp(segment.start(), false, "."),
                format_timestamp(segment.end(), false, "."),
                escape_arrow(segment.text().trim()),
            )?;
        }

        Ok(())
    }
}

/// SubRip cues, 1-based, always with hours and `,` milliseconds
pub struct WriteSrt;

impl ResultWriter for WriteSrt {
    fn write_result(&self, transcript: &Transcript, out: &mut dyn Write) -> io::Result<()> {
        for (index, segment) in transcript.segments().iter().enumerate() {
            write!(
                out,
                "{}\n{} --> {}\n{}\n\n",
                index + 1,
                format_timestamp(segment.start(), true, ","),
                format_timestamp(segment.end(), true, ","),
                escape_arrow(segment.text().trim()),
            )?;
        }

        Ok(())
    }
}

/// Tab-separated integer milliseconds and text
///
/// Text is not trimmed; embedded tabs become single spaces.
pub struct WriteTsv;

impl ResultWriter for WriteTsv {
    fn write_result(&self, transcript: &Transcript, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"start\tend\ttext\n")?;

        for segment in transcript.segments() {
            writeln!(
                out,
                "{}\t{}\t{}",
                to_millis(segment.start()),
                to_millis(segment.end()),
                segment.text().replace('\t', " "),
            )?;
        }

        Ok(())
    }
}

/// The transcript itself as a compact JSON object
pub struct WriteJson;

impl ResultWriter for WriteJson {
    fn write_result(&self, transcript: &Transcript, out: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(out, transcript).map_err(io::Error::from)
    }
}
