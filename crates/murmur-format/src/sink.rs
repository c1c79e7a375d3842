use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use murmur_engine::Transcript;

use crate::{FormatError, OutputFormat};

/// Write `transcript` to `<dir>/<audio basename>.<extension>`
///
/// Failures are logged and returned; nothing is retried.
pub fn write_to_dir(
    transcript: &Transcript,
    format: OutputFormat,
    dir: &Path,
    audio_path: &Path,
) -> Result<PathBuf, FormatError> {
    let name = audio_path
        .file_name()
        .map_or_else(|| "audio".into(), |s| s.to_string_lossy());
    let path = dir.join(format!("{name}.{}", format.extension()));

    let result = File::create(&path).and_then(|file| {
        let mut out = BufWriter::new(file);
        format.writer().write_result(transcript, &mut out)?;
        out.flush()
    });

    if let Err(e) = result {
        tracing::error!(path = %path.display(), "failed to write transcript: {e}");
        return Err(FormatError::Io(e));
    }

    tracing::debug!(path = %path.display(), "transcript written");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use murmur_engine::Segment;

    use super::*;

    fn transcript() -> Transcript {
        Transcript::from_segments("en", vec![Segment::new(0.0, 1.0, " hi ")])
    }

    #[test]
    fn names_the_file_after_the_upload() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_to_dir(&transcript(), OutputFormat::Srt, dir.path(), Path::new("/uploads/talk.mp3")).unwrap();

        assert_eq!(path, dir.path().join("talk.mp3.srt"));
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "1\n00:00:00,000 --> 00:00:01,000\nhi\n\n"
        );
    }

    #[test]
    fn path_without_file_name_falls_back() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_to_dir(&transcript(), OutputFormat::Vtt, dir.path(), Path::new("/")).unwrap();

        assert_eq!(path, dir.path().join("audio.vtt"));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = write_to_dir(&transcript(), OutputFormat::Txt, &missing, Path::new("a.wav")).unwrap_err();

        assert!(matches!(err, FormatError::Io(_)));
    }
}
