use crate::io::BYTES_PER_SAMPLE;

/// Serialize PCM16 samples as little-endian bytes.
pub fn encode_pcm16_le(samples: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * BYTES_PER_SAMPLE);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}

/// Read little-endian PCM16 bytes back into samples. A trailing odd byte is ignored.
pub fn decode_pcm16_le(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(BYTES_PER_SAMPLE)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Scale a PCM16 sample into -1.0..1.0.
#[inline]
pub fn pcm16_to_f32(sample: i16) -> f32 {
    sample as f32 / 32_768.0
}

/// Size in bytes of a static playback buffer holding `sample_count` samples.
///
/// Never smaller than the output's minimum buffer, never smaller than the
/// samples themselves.
pub fn playback_buffer_bytes(min_buffer_bytes: usize, sample_count: usize) -> usize {
    min_buffer_bytes.max(sample_count * BYTES_PER_SAMPLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_little_endian() {
        let bytes = encode_pcm16_le(&[0x0102, -1, i16::MIN]);
        assert_eq!(bytes, vec![0x02, 0x01, 0xFF, 0xFF, 0x00, 0x80]);
    }

    #[test]
    fn decode_ignores_trailing_byte() {
        assert_eq!(decode_pcm16_le(&[0x02, 0x01, 0x7F]), vec![0x0102]);
    }

    #[test]
    fn pcm16_scales_into_unit_range() {
        assert_eq!(pcm16_to_f32(0), 0.0);
        assert_eq!(pcm16_to_f32(i16::MIN), -1.0);
        assert!(pcm16_to_f32(i16::MAX) < 1.0);
    }

    #[test]
    fn buffer_size_takes_larger_bound() {
        assert_eq!(playback_buffer_bytes(4_096, 88_200), 176_400);
        assert_eq!(playback_buffer_bytes(4_096, 100), 4_096);
    }
}
