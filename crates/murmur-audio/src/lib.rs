//! Audio normalization
//!
//! Turns uploaded bytes into mono 32-bit float PCM at a fixed sample rate,
//! optionally decoding them through `ffmpeg` first

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod decoder;
mod error;
mod pcm;

use murmur_config::AudioConfig;

pub use decoder::FfmpegDecoder;
pub use error::DecodeError;
pub use pcm::s16le_to_f32;

/// Stateless converter from uploads to normalized samples
#[derive(Debug, Clone)]
pub struct AudioNormalizer {
    decoder: FfmpegDecoder,
}

impl AudioNormalizer {
    pub fn new(decoder: FfmpegDecoder) -> Self {
        Self { decoder }
    }

    pub fn from_config(config: &AudioConfig) -> Self {
        Self::new(FfmpegDecoder::new(config.ffmpeg_path.clone()))
    }

    /// Convert `raw` into samples in `[-1.0, 1.0]`
    ///
    /// With `encode` the bytes may be any container or codec and are
    /// downmixed and resampled to `sample_rate` by the decoder. Without it
    /// they must already be mono s16le PCM at `sample_rate`.
    pub async fn normalize(&self, raw: Vec<u8>, encode: bool, sample_rate: u32) -> Result<Vec<f32>, DecodeError> {
        let pcm = if encode {
            self.decoder.decode(raw, sample_rate).await?
        } else {
            raw
        };

        let samples = s16le_to_f32(&pcm)?;

        #[allow(clippy::cast_precision_loss)]
        let seconds = samples.len() as f64 / f64::from(sample_rate);
        tracing::debug!(samples = samples.len(), seconds, encode, "audio normalized");

        Ok(samples)
    }
}
