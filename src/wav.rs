//! Canonical RIFF/WAVE container: header layout, writing, and read-back.
//!
//! The header is laid out by hand from [`WavHeader`]; hound is only used to
//! decode files again when they are checked on read-back.

use std::convert::TryFrom;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use hound::WavReader;
use tracing::{debug, info};

use crate::error::{invalid, Result};

const PCM_FORMAT: u16 = 1;
const FMT_CHUNK_LEN: u32 = 16;
pub const HEADER_LEN: usize = 44;
/// Largest data chunk whose RIFF size, header and pad byte included, fits in 32 bits.
pub const MAX_DATA_LEN: u32 = u32::MAX - 37;

/// The 44-byte header of an uncompressed PCM WAVE file. Every derived field
/// is computed and range checked once, in [`WavHeader::pcm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
    block_align: u16,
    byte_rate: u32,
    data_len: u32,
}

impl WavHeader {
    pub fn pcm(
        channels: u16,
        sample_width: u16,
        sample_rate: u32,
        data_len: usize,
    ) -> Result<WavHeader> {
        if channels == 0 {
            return Err(invalid("channels", "must be at least 1"));
        }
        if !(1..=4).contains(&sample_width) {
            return Err(invalid(
                "sample_width",
                format!("{} bytes is not between 1 and 4", sample_width),
            ));
        }
        if sample_rate == 0 {
            return Err(invalid("frame_rate", "must be at least 1 Hz"));
        }
        let block_align = match u16::try_from(u32::from(channels) * u32::from(sample_width)) {
            Ok(align) => align,
            Err(_) => {
                return Err(invalid(
                    "channels",
                    format!("{} channels of {} bytes overflow the block alignment", channels, sample_width),
                ))
            }
        };
        let byte_rate = match sample_rate.checked_mul(u32::from(block_align)) {
            Some(rate) => rate,
            None => {
                return Err(invalid(
                    "frame_rate",
                    format!("{} Hz overflows the byte rate of {}-byte frames", sample_rate, block_align),
                ))
            }
        };
        if data_len % usize::from(block_align) != 0 {
            return Err(invalid(
                "pcm_bytes",
                format!("{} bytes is not a whole number of {}-byte frames", data_len, block_align),
            ));
        }
        // RIFF sizes are 32-bit and must leave room for the header and pad byte.
        let data_len = match u32::try_from(data_len) {
            Ok(len) if len <= MAX_DATA_LEN => len,
            _ => return Err(invalid("pcm_bytes", "too large for a RIFF container")),
        };
        Ok(WavHeader {
            channels,
            sample_rate,
            bits_per_sample: sample_width * 8,
            block_align,
            byte_rate,
            data_len,
        })
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    pub fn block_align(&self) -> u16 {
        self.block_align
    }

    pub fn byte_rate(&self) -> u32 {
        self.byte_rate
    }

    pub fn data_len(&self) -> u32 {
        self.data_len
    }

    /// Chunks are word aligned, so an odd data chunk is followed by a pad byte.
    pub fn needs_pad(&self) -> bool {
        self.data_len % 2 == 1
    }

    pub fn riff_len(&self) -> u32 {
        36 + self.data_len + self.needs_pad() as u32
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(b"RIFF");
        out[4..8].copy_from_slice(&self.riff_len().to_le_bytes());
        out[8..12].copy_from_slice(b"WAVE");

        out[12..16].copy_from_slice(b"fmt ");
        out[16..20].copy_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
        out[20..22].copy_from_slice(&PCM_FORMAT.to_le_bytes());
        out[22..24].copy_from_slice(&self.channels.to_le_bytes());
        out[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        out[28..32].copy_from_slice(&self.byte_rate.to_le_bytes());
        out[32..34].copy_from_slice(&self.block_align.to_le_bytes());
        out[34..36].copy_from_slice(&self.bits_per_sample.to_le_bytes());

        out[36..40].copy_from_slice(b"data");
        out[40..44].copy_from_slice(&self.data_len.to_le_bytes());
        out
    }
}

/// Write `pcm_bytes` to `path` behind a PCM header, replacing any existing
/// file. Nothing is created if the geometry is invalid; a failed write leaves
/// whatever was already written in place.
pub fn write_wav(
    path: impl AsRef<Path>,
    channels: u16,
    sample_width: u16,
    frame_rate: u32,
    pcm_bytes: &[u8],
) -> Result<()> {
    let path = path.as_ref();
    let header = WavHeader::pcm(channels, sample_width, frame_rate, pcm_bytes.len())?;
    let header_bytes = header.to_bytes();
    debug!(?header, path = %path.display(), "writing wav");

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&header_bytes)?;
    writer.write_all(pcm_bytes)?;
    if header.needs_pad() {
        writer.write_all(&[0])?;
    }
    writer.flush()?;

    info!(
        "wrote {} ({} bytes of audio at {} Hz)",
        path.display(),
        header.data_len(),
        header.sample_rate()
    );
    Ok(())
}

/// Header facts of a WAVE file as reported by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavInfo {
    pub channels: u16,
    pub sample_width: u16,
    pub frame_rate: u32,
    pub frames: u32,
}

pub fn read_wav_info(path: impl AsRef<Path>) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    Ok(WavInfo {
        channels: spec.channels,
        sample_width: spec.bits_per_sample / 8,
        frame_rate: spec.sample_rate,
        frames: reader.duration(),
    })
}

/// Decode every sample of a 16-bit PCM file, channels interleaved.
pub fn read_wav_samples(path: impl AsRef<Path>) -> Result<Vec<i16>> {
    let mut reader = WavReader::open(path)?;
    let samples = reader.samples::<i16>().collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(samples)
}
