//! Sine tone synthesis.

use std::f64::consts::PI;

use tracing::debug;

use crate::error::{invalid, Result};
use crate::wav::MAX_DATA_LEN;

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_DURATION: f64 = 1.0;
/// Concert pitch A4.
pub const DEFAULT_FREQUENCY: f64 = 440.0;
/// Largest magnitude a 16-bit signed sample can hold on both sides of zero.
pub const FULL_SCALE: f64 = 32767.0;
/// Most 16-bit samples a single WAVE data chunk can hold.
pub const MAX_SAMPLES: u32 = MAX_DATA_LEN / 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneParams {
    pub sample_rate: u32,
    pub duration: f64,
    pub frequency: f64,
    pub amplitude: f64,
}

impl Default for ToneParams {
    fn default() -> Self {
        ToneParams {
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration: DEFAULT_DURATION,
            frequency: DEFAULT_FREQUENCY,
            amplitude: FULL_SCALE,
        }
    }
}

impl ToneParams {
    pub fn generate(&self) -> Result<Vec<f64>> {
        generate_tone(self.sample_rate, self.duration, self.frequency, self.amplitude)
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(invalid(name, format!("{} is not a finite number", value)));
    }
    if value < 0.0 {
        return Err(invalid(name, format!("{} is negative", value)));
    }
    Ok(())
}

/// Number of samples in `duration` seconds, truncated toward zero. Counts
/// that could never be written to a WAVE file are rejected before anything
/// is allocated.
pub fn sample_count(sample_rate: u32, duration: f64) -> Result<usize> {
    if sample_rate == 0 {
        return Err(invalid("sample_rate", "must be at least 1 Hz"));
    }
    non_negative("duration", duration)?;
    let count = (f64::from(sample_rate) * duration).trunc();
    if count > f64::from(MAX_SAMPLES) {
        return Err(invalid(
            "duration",
            format!(
                "{} s at {} Hz is {} samples, more than the {} a WAVE file can hold",
                duration, sample_rate, count, MAX_SAMPLES
            ),
        ));
    }
    Ok(count as usize)
}

/// Evenly spaced times covering `[0, duration)`, one per sample. The endpoint
/// is excluded.
pub fn sample_times(sample_rate: u32, duration: f64) -> Result<Vec<f64>> {
    let len = sample_count(sample_rate, duration)?;
    if len == 0 {
        return Ok(Vec::new());
    }
    let step = duration / len as f64;
    Ok((0..len).map(|i| i as f64 * step).collect())
}

/// Fill a buffer with `amplitude * sin(2π * frequency * t)` for every sample
/// time in `[0, duration)`.
///
/// A zero duration gives an empty buffer and a zero frequency gives silence;
/// negative or non-finite values and a zero sample rate are rejected.
pub fn generate_tone(
    sample_rate: u32,
    duration: f64,
    frequency: f64,
    amplitude: f64,
) -> Result<Vec<f64>> {
    non_negative("frequency", frequency)?;
    non_negative("amplitude", amplitude)?;
    let times = sample_times(sample_rate, duration)?;
    debug!(
        samples = times.len(),
        sample_rate, frequency, amplitude, "generating sine tone"
    );

    let mut waveform = Vec::with_capacity(times.len());
    for t in times {
        waveform.push(amplitude * (2.0 * PI * frequency * t).sin());
    }
    Ok(waveform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::quantize_16bit;
    use crate::Error;

    #[test]
    fn default_tone_shape() {
        let waveform = ToneParams::default().generate().unwrap();
        assert_eq!(waveform.len(), 44100);
        assert_eq!(waveform[0], 0.0);
        assert!(waveform.iter().all(|v| v.abs() <= FULL_SCALE));
    }

    #[test]
    fn length_is_truncated_product() {
        for &(rate, duration, expected) in &[
            (44100, 0.5, 22050),
            (8000, 0.0001, 0),
            (8000, 0.00026, 2),
            (48000, 2.0, 96000),
            (3, 1.9, 5),
        ] {
            let waveform = generate_tone(rate, duration, 440.0, 1000.0).unwrap();
            assert_eq!(waveform.len(), expected, "rate {} duration {}", rate, duration);
        }
    }

    #[test]
    fn rejects_unwritable_lengths() {
        for &(rate, duration) in &[(44100, 1e15), (u32::MAX, 1.0), (1, f64::from(MAX_SAMPLES) + 1.0)] {
            match sample_count(rate, duration) {
                Err(Error::InvalidParameter { name, .. }) => assert_eq!(name, "duration"),
                other => panic!("expected InvalidParameter, got {:?}", other),
            }
        }
        match generate_tone(44100, 1e15, 440.0, 100.0) {
            Err(Error::InvalidParameter { name, .. }) => assert_eq!(name, "duration"),
            other => panic!("expected InvalidParameter, got {:?}", other.map(|w| w.len())),
        }
        assert_eq!(sample_count(1, f64::from(MAX_SAMPLES)).unwrap(), MAX_SAMPLES as usize);
    }

    #[test]
    fn full_scale_tones_stay_in_range() {
        for &(rate, frequency, amplitude) in &[
            (44100, 440.0, FULL_SCALE),
            (48000, 1000.0, FULL_SCALE),
            (8000, 2000.0, FULL_SCALE),
            (22050, 0.25, FULL_SCALE),
            (96000, 12345.6, FULL_SCALE),
            (11025, 5512.5, FULL_SCALE),
            (44100, 440.0, 16384.0),
            (16000, 7999.0, 1.0),
        ] {
            let waveform = generate_tone(rate, 1.0, frequency, amplitude).unwrap();
            assert!(
                waveform.iter().all(|v| v.abs() <= amplitude),
                "{} Hz at {} Hz exceeds {}",
                frequency,
                rate,
                amplitude
            );
            let pcm = quantize_16bit(&waveform).unwrap();
            assert_eq!(pcm.len(), waveform.len());
        }
    }

    #[test]
    fn times_exclude_endpoint() {
        let times = sample_times(4, 1.0).unwrap();
        assert_eq!(times, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn zero_duration_is_empty() {
        assert!(generate_tone(44100, 0.0, 440.0, FULL_SCALE).unwrap().is_empty());
    }

    #[test]
    fn zero_frequency_is_silent() {
        let waveform = generate_tone(44100, 1.0, 0.0, FULL_SCALE).unwrap();
        assert_eq!(waveform.len(), 44100);
        assert!(waveform.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn quarter_period_hits_peak() {
        // 1 Hz sampled at 4 Hz lands on the positive peak at t = 0.25.
        let waveform = generate_tone(4, 1.0, 1.0, 100.0).unwrap();
        assert!((waveform[1] - 100.0).abs() < 1e-9);
        assert!((waveform[3] + 100.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_parameters() {
        let cases = [
            generate_tone(0, 1.0, 440.0, FULL_SCALE),
            generate_tone(44100, -1.0, 440.0, FULL_SCALE),
            generate_tone(44100, 1.0, -440.0, FULL_SCALE),
            generate_tone(44100, 1.0, 440.0, -1.0),
            generate_tone(44100, f64::NAN, 440.0, FULL_SCALE),
            generate_tone(44100, 1.0, f64::INFINITY, FULL_SCALE),
        ];
        for result in cases.iter() {
            match result {
                Err(Error::InvalidParameter { .. }) => {}
                other => panic!("expected InvalidParameter, got {:?}", other),
            }
        }
    }
}
