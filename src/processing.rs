//! Post-processing: soft clipping, quantization, edge fades and smoothing.
//!
//! Every rendered tone passes through [`soft_clip`] + [`quantize`] and then
//! [`apply_fades`]. Noise-based tones additionally run [`smooth`].

use crate::SAMPLE_RATE;
use std::time::Duration;

/// Fraction of full scale used by quantized output.
pub const HEADROOM: f64 = 0.9;

/// Largest magnitude [`quantize`] can produce.
pub const MAX_OUTPUT: i16 = 29_490;

/// Compresses values beyond ±1.0 with `sign(s)·(1 - exp(-(|s| - 1)))`.
///
/// Values inside [-1, 1] pass through unchanged and the result never leaves
/// that range.
///
/// # Examples
///
/// ```
/// use carillon::processing::soft_clip;
///
/// assert_eq!(soft_clip(0.5), 0.5);
/// assert!(soft_clip(3.0) < 1.0);
/// assert!(soft_clip(50.0) <= 1.0);
/// assert_eq!(soft_clip(-3.0), -soft_clip(3.0));
/// ```
pub fn soft_clip(sample: f64) -> f64 {
    let magnitude = sample.abs();
    if magnitude > 1.0 {
        sample.signum() * (1.0 - (-(magnitude - 1.0)).exp())
    } else {
        sample
    }
}

/// Soft clips a float sample and scales it into 16-bit range with headroom.
pub fn quantize(sample: f64) -> i16 {
    (soft_clip(sample) * HEADROOM * i16::MAX as f64).round() as i16
}

/// Length of the linear fade at each end of a buffer of `len` samples:
/// 10 ms, or a tenth of the buffer if that is shorter.
pub fn fade_length(len: usize) -> usize {
    (SAMPLE_RATE as usize / 100).min(len / 10)
}

/// Applies a linear fade-in and fade-out to remove clicks at the edges.
///
/// The first and last samples end up at exactly zero.
pub fn apply_fades(samples: &mut [i16]) {
    let fade = fade_length(samples.len());
    let last = samples.len().saturating_sub(1);
    for i in 0..fade {
        let factor = i as f64 / fade as f64;
        samples[i] = scale(samples[i], factor);
        samples[last - i] = scale(samples[last - i], factor);
    }
}

fn scale(sample: i16, factor: f64) -> i16 {
    (sample as f64 * factor).round() as i16
}

/// 3-tap low-pass `(x[i-1] + 2·x[i] + x[i+1]) / 4`, keeping the first and
/// last samples as they are.
pub fn smooth(samples: &mut [i16]) {
    if samples.len() < 3 {
        return;
    }
    let mut previous = samples[0] as i32;
    for i in 1..samples.len() - 1 {
        let current = samples[i] as i32;
        let next = samples[i + 1] as i32;
        samples[i] = ((previous + 2 * current + next) / 4) as i16;
        previous = current;
    }
}

/// A finished mono tone: signed 16-bit samples at [`SAMPLE_RATE`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleBuffer {
    samples: Vec<i16>,
}

impl SampleBuffer {
    /// Wraps already processed samples.
    pub fn new(samples: Vec<i16>) -> Self {
        Self { samples }
    }

    /// Runs the post-processing pipeline over raw voice output.
    pub fn from_raw(raw: &[f64], smoothing: bool) -> Self {
        let mut samples: Vec<i16> = raw.iter().copied().map(quantize).collect();
        apply_fades(&mut samples);
        if smoothing {
            smooth(&mut samples);
        }
        Self { samples }
    }

    /// The samples in playback order.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Consumes the buffer, returning its samples.
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playing time at [`SAMPLE_RATE`].
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples.len() as f64 / SAMPLE_RATE as f64)
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> u16 {
        self.samples
            .iter()
            .map(|s| s.unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    /// Raw PCM bytes, little-endian, as handed to an output stream.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }
}

impl AsRef<[i16]> for SampleBuffer {
    fn as_ref(&self) -> &[i16] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_clip_passes_in_range_values() {
        for s in [-1.0, -0.3, 0.0, 0.42, 1.0] {
            assert_eq!(soft_clip(s), s);
        }
    }

    #[test]
    fn test_soft_clip_compresses_out_of_range() {
        let clipped = soft_clip(2.0);
        assert!((clipped - (1.0 - (-1.0_f64).exp())).abs() < 1e-12);
        assert!(soft_clip(1e6) <= 1.0);
        assert!(soft_clip(-1e6) >= -1.0);
        assert!(soft_clip(-2.0) < 0.0);
    }

    #[test]
    fn test_quantize_bounds() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), MAX_OUTPUT);
        assert_eq!(quantize(-1.0), -MAX_OUTPUT);
        for s in [1.5, 3.0, 100.0, f64::MAX, -7.0] {
            assert!(quantize(s).unsigned_abs() <= MAX_OUTPUT as u16);
        }
    }

    #[test]
    fn test_fade_length() {
        assert_eq!(fade_length(132_300), 441);
        assert_eq!(fade_length(2000), 200);
        assert_eq!(fade_length(9), 0);
        assert_eq!(fade_length(0), 0);
    }

    #[test]
    fn test_fades_ramp_both_edges() {
        let mut samples = vec![10_000_i16; 2_000];
        apply_fades(&mut samples);
        let fade = fade_length(samples.len());
        assert_eq!(samples[0], 0);
        assert_eq!(samples[samples.len() - 1], 0);
        assert_eq!(samples[fade / 2], 5_000);
        for i in 1..fade {
            assert!(samples[i] >= samples[i - 1]);
            assert!(samples[samples.len() - 1 - i] >= samples[samples.len() - i]);
        }
        assert!(samples[fade..samples.len() - fade].iter().all(|&s| s == 10_000));
    }

    #[test]
    fn test_fades_on_tiny_buffers() {
        let mut empty: Vec<i16> = Vec::new();
        apply_fades(&mut empty);
        let mut short = vec![100_i16; 5];
        apply_fades(&mut short);
        assert_eq!(short, vec![100; 5]);
    }

    #[test]
    fn test_smooth_filter() {
        let mut samples = vec![0_i16, 400, 0, 400, 0];
        smooth(&mut samples);
        assert_eq!(samples, vec![0, 200, 200, 200, 0]);
    }

    #[test]
    fn test_smooth_uses_original_neighbours() {
        let mut samples = vec![100_i16, 100, 100, -100];
        smooth(&mut samples);
        assert_eq!(samples, vec![100, 100, 50, -100]);
    }

    #[test]
    fn test_smooth_short_buffers_untouched() {
        let mut samples = vec![5_i16, -5];
        smooth(&mut samples);
        assert_eq!(samples, vec![5, -5]);
    }

    #[test]
    fn test_from_raw_pipeline() {
        let raw = vec![4.0; 1000];
        let buffer = SampleBuffer::from_raw(&raw, false);
        assert_eq!(buffer.len(), 1000);
        assert_eq!(buffer.samples()[0], 0);
        assert!(buffer.peak() <= MAX_OUTPUT as u16);
        assert_eq!(buffer.samples()[500], quantize(4.0));
    }

    #[test]
    fn test_buffer_accessors() {
        let buffer = SampleBuffer::new(vec![1, -2, 0x0102]);
        assert_eq!(buffer.peak(), 0x0102);
        assert_eq!(buffer.to_le_bytes(), vec![1, 0, 0xfe, 0xff, 0x02, 0x01]);
        assert!(!buffer.is_empty());
        let second = SampleBuffer::new(vec![0; 44_100]);
        assert_eq!(second.duration(), Duration::from_secs(1));
    }
}
