//! Sine-tone WAVE fixture generation.
//!
//! The default fixture is one second of 440 Hz at 44.1 kHz, truncated to
//! 16-bit signed PCM and stored as a mono RIFF/WAVE file.

pub mod analysis;
pub mod config;
mod error;
pub mod fixture;
pub mod quantize;
pub mod tone;
pub mod wav;

pub use analysis::dominant_frequency;
pub use config::{Config, Overrides};
pub use error::{Error, Result};
pub use fixture::{render_fixture, FixtureSummary};
pub use quantize::{pcm_to_le_bytes, quantize_16bit};
pub use tone::{generate_tone, sample_times, ToneParams};
pub use wav::{read_wav_info, read_wav_samples, write_wav, WavHeader, WavInfo};
