//! Pitch check for rendered tones.

use num::complex::Complex;
use rustfft::FFTplanner;
use std::f64::consts::PI;

fn hanning_multiplier(i: f64, block_size: f64) -> f64 {
    0.5 * (1.0 - (2.0 * PI * i / (block_size - 1.0)).cos())
}

/// Frequency in Hz of the strongest non-DC bin of `samples`, or `None` when
/// there is nothing to measure.
pub fn dominant_frequency(samples: &[i16], sample_rate: u32) -> Option<f64> {
    let n = samples.len();
    if n < 2 {
        return None;
    }

    let block_size = n as f64;
    let mut input: Vec<Complex<f64>> = samples
        .iter()
        .enumerate()
        .map(|(i, &s)| Complex::new(hanning_multiplier(i as f64, block_size) * f64::from(s), 0.0))
        .collect();
    let mut spectrum = vec![Complex::new(0.0, 0.0); n];

    let mut planner = FFTplanner::new(false); // forward
    let fft = planner.plan_fft(n);
    fft.process(&mut input, &mut spectrum);

    let mut peak_bin = 0;
    let mut peak = 0.0;
    for (bin, value) in spectrum.iter().enumerate().take(n / 2 + 1).skip(1) {
        let magnitude = value.norm_sqr();
        if magnitude > peak {
            peak = magnitude;
            peak_bin = bin;
        }
    }
    if peak_bin == 0 {
        return None;
    }
    Some(peak_bin as f64 * f64::from(sample_rate) / block_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::quantize_16bit;
    use crate::tone::generate_tone;

    fn tone(sample_rate: u32, frequency: f64) -> Vec<i16> {
        let waveform = generate_tone(sample_rate, 1.0, frequency, 32767.0).unwrap();
        quantize_16bit(&waveform).unwrap()
    }

    #[test]
    fn finds_concert_a() {
        let found = dominant_frequency(&tone(44100, 440.0), 44100).unwrap();
        assert!((found - 440.0).abs() < 1.0, "found {}", found);
    }

    #[test]
    fn finds_other_pitches() {
        for &frequency in &[100.0, 1000.0, 3000.0] {
            let found = dominant_frequency(&tone(8000, frequency), 8000).unwrap();
            assert!((found - frequency).abs() < 1.0, "{} Hz measured as {}", frequency, found);
        }
    }

    #[test]
    fn silence_has_no_pitch() {
        assert_eq!(dominant_frequency(&vec![0; 1024], 44100), None);
        assert_eq!(dominant_frequency(&[100], 44100), None);
        assert_eq!(dominant_frequency(&[], 44100), None);
    }
}
