use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::tone::{
    ToneParams, DEFAULT_DURATION, DEFAULT_FREQUENCY, DEFAULT_SAMPLE_RATE, FULL_SCALE,
};

/// Fixture settings, read from a TOML file. Missing keys take the defaults of
/// the standard one-second A4 fixture.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default = "default_frequency")]
    pub frequency: f64,
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}
fn default_duration() -> f64 {
    DEFAULT_DURATION
}
fn default_frequency() -> f64 {
    DEFAULT_FREQUENCY
}
fn default_amplitude() -> f64 {
    FULL_SCALE
}
fn default_output() -> PathBuf {
    PathBuf::from("test_pcm.wav")
}

/// Values given on the command line. Any field that is set wins over the
/// config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub output: Option<PathBuf>,
    pub sample_rate: Option<u32>,
    pub duration: Option<f64>,
    pub frequency: Option<f64>,
    pub amplitude: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sample_rate: default_sample_rate(),
            duration: default_duration(),
            frequency: default_frequency(),
            amplitude: default_amplitude(),
            output: default_output(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Using default config, could not load {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Defaults, then the file at `path` if one is given, then `overrides`.
    pub fn resolve(path: Option<&Path>, overrides: Overrides) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(sample_rate) = overrides.sample_rate {
            self.sample_rate = sample_rate;
        }
        if let Some(duration) = overrides.duration {
            self.duration = duration;
        }
        if let Some(frequency) = overrides.frequency {
            self.frequency = frequency;
        }
        if let Some(amplitude) = overrides.amplitude {
            self.amplitude = amplitude;
        }
    }

    pub fn tone_params(&self) -> ToneParams {
        ToneParams {
            sample_rate: self.sample_rate,
            duration: self.duration,
            frequency: self.frequency,
            amplitude: self.amplitude,
        }
    }
}
