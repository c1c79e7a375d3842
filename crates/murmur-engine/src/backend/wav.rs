use std::io::Cursor;

use crate::error::ModelError;

/// Encode normalized samples as a mono 16-bit WAV file
///
/// Inverse of the normalizer scaling; out-of-range samples are clamped.
pub(super) fn encode(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, ModelError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));

    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| ModelError::InvalidRequest(format!("failed to start WAV encoding: {e}")))?;

        for sample in samples {
            writer
                .write_sample(to_i16(*sample))
                .map_err(|e| ModelError::InvalidRequest(format!("failed to encode sample: {e}")))?;
        }

        writer
            .finalize()
            .map_err(|e| ModelError::InvalidRequest(format!("failed to finish WAV encoding: {e}")))?;
    }

    Ok(cursor.into_inner())
}

#[allow(clippy::cast_possible_truncation)]
fn to_i16(sample: f32) -> i16 {
    (sample * 32768.0).round().clamp(-32768.0, 32767.0) as i16
}
