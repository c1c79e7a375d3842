use crate::error::DecodeError;

/// Full scale of signed 16-bit PCM
const I16_SCALE: f32 = 32768.0;

/// Reinterpret signed 16-bit little-endian PCM as samples in `[-1.0, 1.0)`
pub fn s16le_to_f32(bytes: &[u8]) -> Result<Vec<f32>, DecodeError> {
    if bytes.len() % 2 != 0 {
        return Err(DecodeError::MisalignedPcm(bytes.len()));
    }

    Ok(bytes
        .chunks_exact(2)
        .map(|pair| f32::from(i16::from_le_bytes([pair[0], pair[1]])) / I16_SCALE)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_to_unit_range() {
        let bytes: Vec<u8> = [0_i16, 16384, -16384, i16::MIN, i16::MAX]
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();

        let samples = s16le_to_f32(&bytes).unwrap();

        assert_eq!(samples[..4], [0.0, 0.5, -0.5, -1.0]);
        assert!(samples[4] < 1.0 && samples[4] > 0.999);
    }

    #[test]
    fn empty_input_gives_no_samples() {
        assert!(s16le_to_f32(&[]).unwrap().is_empty());
    }

    #[test]
    fn odd_length_is_rejected() {
        assert!(matches!(s16le_to_f32(&[0, 1, 2]), Err(DecodeError::MisalignedPcm(3))));
    }
}
