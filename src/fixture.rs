//! The full generate, quantize, and write pass.

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::quantize::{pcm_to_le_bytes, quantize_16bit};
use crate::tone::ToneParams;
use crate::wav::write_wav;

pub const CHANNELS: u16 = 1;
pub const SAMPLE_WIDTH: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureSummary {
    pub samples: usize,
    pub data_len: usize,
}

/// Render `params` as a mono 16-bit WAVE file at `path`.
pub fn render_fixture(params: &ToneParams, path: impl AsRef<Path>) -> Result<FixtureSummary> {
    let waveform = params.generate()?;
    let pcm = quantize_16bit(&waveform)?;
    let bytes = pcm_to_le_bytes(&pcm);
    debug!(samples = pcm.len(), bytes = bytes.len(), "quantized tone");

    write_wav(path, CHANNELS, SAMPLE_WIDTH, params.sample_rate, &bytes)?;
    Ok(FixtureSummary {
        samples: pcm.len(),
        data_len: bytes.len(),
    })
}
