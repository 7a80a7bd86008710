use clap::Parser;
use prbsgen_rs::prbs::PrbsOrder;
use prbsgen_rs::stimulus::{Stimulus, StimulusConfig, StimulusError, StimulusOverrides, output};
use prbsgen_rs::ui::print_banner;
use prbsgen_rs::ui::progress::{ProgressManager, templates};
use prbsgen_rs::utils::consts::GENERATION_CHUNK_BITS;
use prbsgen_rs::utils::logging::init_logging;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about = "PRBS/NRZ stimulus generator", long_about = None)]
struct Cli {
    /// JSON stimulus config; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// PRBS order: 7, 9, 11, 15, 23 or 31
    #[arg(long)]
    order: Option<PrbsOrder>,
    /// Start register value, e.g. 127 or 0x7F (default: all ones)
    #[arg(long)]
    seed: Option<String>,
    /// Number of bits to generate
    #[arg(short = 'n', long)]
    count: Option<usize>,
    #[arg(long)]
    samples_per_bit: Option<usize>,
    #[arg(long, allow_negative_numbers = true)]
    v_high: Option<f32>,
    #[arg(long, allow_negative_numbers = true)]
    v_low: Option<f32>,
    #[arg(long)]
    sample_rate: Option<u32>,
    /// Write the full stimulus as JSON
    #[arg(long)]
    json: Option<PathBuf>,
    /// Write the NRZ waveform as 16-bit WAV
    #[arg(long)]
    wav: Option<PathBuf>,
    /// Write the bits, one per line
    #[arg(long)]
    bits: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> StimulusOverrides {
        StimulusOverrides {
            order: self.order,
            seed: self
                .seed
                .clone()
                .map(serde_json::Value::String),
            bit_count: self.count,
            samples_per_bit: self.samples_per_bit,
            v_high: self.v_high,
            v_low: self.v_low,
            sample_rate: self.sample_rate,
        }
    }
}

fn run(cli: &Cli) -> Result<(), StimulusError> {
    let config = StimulusConfig::resolve(cli.config.as_deref(), &cli.overrides())?;
    let modulator = config.modulator()?;
    let mut prbs = config.generator()?;

    info!(
        "Generating {} bits of {} (taps {:?}, seed {:#x})",
        config.bit_count,
        prbs.order(),
        prbs.taps(),
        prbs.seed()
    );

    let progress = ProgressManager::new();
    let show_progress = config.bit_count > GENERATION_CHUNK_BITS;
    if show_progress {
        if let Err(e) = progress.create_bar(
            "generate",
            config.bit_count as u64,
            templates::GENERATE,
            &prbs.order().to_string(),
        ) {
            warn!("progress bar unavailable: {}", e);
        }
    }

    let mut bits = vec![0u8; config.bit_count];
    for chunk in bits.chunks_mut(GENERATION_CHUNK_BITS) {
        prbs.fill_bits(chunk);
        if show_progress {
            if let Err(e) = progress.inc("generate", chunk.len() as u64) {
                warn!("progress update failed: {}", e);
            }
        }
    }
    if show_progress {
        if let Err(e) = progress.finish("generate", "done") {
            warn!("progress finish failed: {}", e);
        }
    }

    let stimulus = Stimulus::from_bits(prbs.order(), prbs.seed(), bits, modulator);

    let mut wrote_file = false;
    if let Some(path) = &cli.json {
        output::write_json(&stimulus, path)?;
        wrote_file = true;
    }
    if let Some(path) = &cli.wav {
        output::write_wav(&stimulus.waveform, config.sample_rate, path)?;
        wrote_file = true;
    }
    if let Some(path) = &cli.bits {
        output::write_bits_txt(&stimulus.bits, path)?;
        wrote_file = true;
    }
    if !wrote_file {
        println!("{}", stimulus.bit_string());
    }

    Ok(())
}

fn main() {
    init_logging();
    print_banner();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Stimulus generation failed: {}", e);
        std::process::exit(1);
    }
}
