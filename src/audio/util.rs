//! Sample format helpers.

/// Full-scale multiplier for 16-bit PCM.
const PCM_SCALE: f32 = 32767.0;

/// Convert a float amplitude to a 16-bit PCM sample.
///
/// The amplitude is clipped to [-1.0, 1.0] before scaling, so out-of-range
/// values saturate instead of wrapping. Scaled values are truncated toward zero.
pub fn f32_to_i16(sample: f32) -> i16 {
    if sample.is_nan() {
        return 0;
    }
    (sample.clamp(-1.0, 1.0) * PCM_SCALE) as i16
}

/// Convert a buffer of float samples to 16-bit PCM.
pub fn convert_to_i16(samples: &[f32]) -> Vec<i16> {
    samples.iter().copied().map(f32_to_i16).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_scale() {
        assert_eq!(f32_to_i16(1.0), 32767);
        assert_eq!(f32_to_i16(-1.0), -32767);
        assert_eq!(f32_to_i16(0.0), 0);
    }

    #[test]
    fn test_truncates_toward_zero() {
        assert_eq!(f32_to_i16(0.5), 16383); // 16383.5
        assert_eq!(f32_to_i16(-0.5), -16383);
    }

    #[test]
    fn test_clips_out_of_range() {
        assert_eq!(f32_to_i16(1.7), 32767);
        assert_eq!(f32_to_i16(-3.0), -32767);
        assert_eq!(f32_to_i16(f32::NAN), 0);
    }

    #[test]
    fn test_convert_buffer_keeps_order() {
        assert_eq!(convert_to_i16(&[0.0, 1.0, -1.0, 2.0]), vec![0, 32767, -32767, 32767]);
    }
}
