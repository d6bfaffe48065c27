//! Narrowing of float waveforms to 16-bit PCM.

use crate::error::{Error, Result};

/// Truncate every sample toward zero into an `i16`.
///
/// Samples are never rounded or clipped: anything that does not fit after
/// truncation, NaN included, is reported with its index.
pub fn quantize_16bit(waveform: &[f64]) -> Result<Vec<i16>> {
    waveform
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            num_traits::cast::<f64, i16>(value).ok_or(Error::OutOfRange { index, value })
        })
        .collect()
}

/// Serialize PCM samples as little-endian 16-bit words.
pub fn pcm_to_le_bytes(pcm: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(pcm.len() * 2);
    for sample in pcm {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}
