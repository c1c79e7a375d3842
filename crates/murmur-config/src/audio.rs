use std::path::PathBuf;

use serde::Deserialize;

/// Sample rate every engine expects its PCM input at
pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;

/// Audio normalization settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AudioConfig {
    /// Decoder binary used when uploads must be re-encoded
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,
    /// Target sample rate in Hz; engines only accept 16 kHz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

#[allow(clippy::missing_const_for_fn)]
fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}
