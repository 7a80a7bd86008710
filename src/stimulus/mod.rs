// Sequence driver: order + seed + count -> ordered bits -> NRZ waveform

pub mod config;
pub mod output;

pub use config::{StimulusConfig, StimulusOverrides};

use crate::modulation::{Modulator, NrzModulator};
use crate::prbs::{InvalidArgument, PrbsGenerator, PrbsOrder};
use tracing::{debug, info};

#[derive(thiserror::Error, Debug)]
pub enum StimulusError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    #[error("Stimulus: I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stimulus: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stimulus: WAV error: {0}")]
    Wav(#[from] hound::Error),
}

/// Generate `count` PRBS bits for `order`, starting from `seed` (or all-ones).
pub fn generate(
    order: PrbsOrder,
    seed: Option<i64>,
    count: usize,
) -> Result<Vec<u8>, InvalidArgument> {
    let mut prbs = PrbsGenerator::new(order, seed)?;
    Ok(prbs.generate_bits(count))
}

/// A generated bit run together with its NRZ waveform.
#[derive(Debug, Clone)]
pub struct Stimulus {
    pub order: PrbsOrder,
    /// Register value the generator was constructed with
    pub seed: u32,
    pub bits: Vec<u8>,
    pub modulator: NrzModulator,
    pub waveform: Vec<f32>,
}

impl Stimulus {
    /// Run the whole pipeline for `config`.
    pub fn build(config: &StimulusConfig) -> Result<Self, InvalidArgument> {
        let modulator = config.modulator()?;
        let mut prbs = config.generator()?;
        let bits = prbs.generate_bits(config.bit_count);
        Ok(Self::from_bits(prbs.order(), prbs.seed(), bits, modulator))
    }

    /// Wrap bits that were already generated (e.g. in chunks).
    pub fn from_bits(order: PrbsOrder, seed: u32, bits: Vec<u8>, modulator: NrzModulator) -> Self {
        let waveform = modulator.encode(&bits);

        info!("Stimulus ready:");
        info!("  - polynomial: {} taps={:?}", order, order.taps());
        info!("  - seed: {:#x}", seed);
        info!(
            "  - bits: {} ({:.3} periods)",
            bits.len(),
            bits.len() as f64 / order.period() as f64
        );
        info!(
            "  - waveform: {} samples ({} x {} samples/bit)",
            waveform.len(),
            modulator.name(),
            modulator.samples_per_bit()
        );
        debug!("ones in run: {}", bits.iter().filter(|&&b| b == 1).count());

        Self {
            order,
            seed,
            bits,
            modulator,
            waveform,
        }
    }

    /// Bits as a `0`/`1` string
    pub fn bit_string(&self) -> String {
        self.bits
            .iter()
            .map(|&b| if b == 1 { '1' } else { '0' })
            .collect()
    }
}
