use std::{path::PathBuf, process::Stdio};

use tokio::{io::AsyncWriteExt, process::Command};

use crate::error::DecodeError;

/// `ffmpeg` subprocess that decodes any container to mono s16le PCM
#[derive(Debug, Clone)]
pub struct FfmpegDecoder {
    program: PathBuf,
}

impl FfmpegDecoder {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    fn command(&self, sample_rate: u32) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-nostdin", "-hide_banner", "-loglevel", "error", "-threads", "0"])
            .args(["-i", "pipe:"])
            .args(["-f", "s16le", "-acodec", "pcm_s16le", "-ac", "1"])
            .args(["-ar", &sample_rate.to_string()])
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    /// Pipe `input` through the decoder and collect the raw PCM it writes
    pub async fn decode(&self, input: Vec<u8>, sample_rate: u32) -> Result<Vec<u8>, DecodeError> {
        let program = self.program.display().to_string();

        let mut child = self.command(sample_rate).spawn().map_err(|e| DecodeError::Spawn {
            program: program.clone(),
            message: e.to_string(),
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| DecodeError::Io("decoder stdin is not piped".to_string()))?;

        // Feed stdin concurrently so a full stdout pipe cannot deadlock the decoder
        let writer = tokio::spawn(async move {
            let result = stdin.write_all(&input).await;
            drop(stdin);
            result
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| DecodeError::Io(format!("failed to wait for decoder: {e}")))?;

        match writer.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::debug!(%program, "decoder closed its input early: {e}"),
            Err(e) => tracing::debug!(%program, "decoder input task failed: {e}"),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

            tracing::error!(%program, status = ?output.status.code(), "failed to load audio: {stderr}");

            return Err(DecodeError::Failed {
                status: output.status.code(),
                stderr,
            });
        }

        tracing::debug!(%program, bytes = output.stdout.len(), "decoded audio");

        Ok(output.stdout)
    }
}
