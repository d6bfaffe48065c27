use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use pcmgen::{dominant_frequency, read_wav_info, read_wav_samples, render_fixture, Config, Overrides};

#[derive(Parser, Debug)]
#[command(name = "pcmgen", about = "Generate sine-tone WAV test fixtures", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a tone fixture (the default command)
    Generate(GenerateArgs),
    /// Print the header and pitch of a WAV file
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// TOML file with fixture settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output WAV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sample rate (Hz)
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Duration (seconds)
    #[arg(long)]
    duration: Option<f64>,

    /// Frequency (Hz)
    #[arg(long)]
    frequency: Option<f64>,

    /// Peak sample magnitude, at most 32767
    #[arg(long)]
    amplitude: Option<f64>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// WAV file to read
    file: PathBuf,

    /// Fail unless the dominant frequency is this many Hz
    #[arg(long)]
    expect_frequency: Option<f64>,

    /// Allowed pitch error (Hz)
    #[arg(long, default_value_t = 1.0)]
    tolerance: f64,
}

fn generate(args: GenerateArgs) -> Result<()> {
    let overrides = Overrides {
        output: args.output,
        sample_rate: args.sample_rate,
        duration: args.duration,
        frequency: args.frequency,
        amplitude: args.amplitude,
    };
    let config = Config::resolve(args.config.as_deref(), overrides)?;

    let summary = render_fixture(&config.tone_params(), &config.output)
        .with_context(|| format!("Failed to write fixture: {}", config.output.display()))?;
    println!(
        "Generated {} ({} samples at {} Hz, {:.1} Hz tone)",
        config.output.display(),
        summary.samples,
        config.sample_rate,
        config.frequency
    );
    Ok(())
}

fn inspect(args: InspectArgs) -> Result<()> {
    let wav = read_wav_info(&args.file)
        .with_context(|| format!("Failed to read WAV file: {}", args.file.display()))?;
    println!("{}", args.file.display());
    println!("  channels:     {}", wav.channels);
    println!("  sample width: {} bytes", wav.sample_width);
    println!("  frame rate:   {} Hz", wav.frame_rate);
    println!("  frames:       {}", wav.frames);

    if wav.channels != 1 || wav.sample_width != 2 {
        info!("pitch is only measured for mono 16-bit files");
        return Ok(());
    }
    let samples = read_wav_samples(&args.file)
        .with_context(|| format!("Failed to decode samples: {}", args.file.display()))?;
    let measured = dominant_frequency(&samples, wav.frame_rate);
    match measured {
        Some(freq) => println!("  dominant:     {:.1} Hz", freq),
        None => println!("  dominant:     none (silent)"),
    }

    if let Some(expected) = args.expect_frequency {
        match measured {
            Some(freq) if (freq - expected).abs() <= args.tolerance => {}
            Some(freq) => bail!("expected {:.1} Hz, measured {:.1} Hz", expected, freq),
            None => bail!("expected {:.1} Hz, file has no measurable tone", expected),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Generate(args)) => generate(args),
        Some(Command::Inspect(args)) => inspect(args),
        None => generate(GenerateArgs::default()),
    }
}
