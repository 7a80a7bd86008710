use super::StimulusError;
use crate::modulation::NrzModulator;
use crate::prbs::{InvalidArgument, PrbsGenerator, PrbsOrder};
use crate::utils::consts::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Everything needed to produce one stimulus run.
///
/// `seed` is kept as a raw JSON value so that a non-integer seed in a config
/// file is reported as such when the generator is built, instead of failing
/// deserialization with a generic type error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StimulusConfig {
    pub order: PrbsOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<Value>,
    pub bit_count: usize,
    pub samples_per_bit: usize,
    pub v_high: f32,
    pub v_low: f32,
    pub sample_rate: u32,
}

impl Default for StimulusConfig {
    fn default() -> Self {
        Self {
            order: PrbsOrder::default(),
            seed: None,
            bit_count: DEFAULT_BIT_COUNT,
            samples_per_bit: DEFAULT_SAMPLES_PER_BIT,
            v_high: DEFAULT_V_HIGH,
            v_low: DEFAULT_V_LOW,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

/// Field-by-field replacements layered over a config, e.g. from CLI flags.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StimulusOverrides {
    pub order: Option<PrbsOrder>,
    pub seed: Option<Value>,
    pub bit_count: Option<usize>,
    pub samples_per_bit: Option<usize>,
    pub v_high: Option<f32>,
    pub v_low: Option<f32>,
    pub sample_rate: Option<u32>,
}

impl StimulusConfig {
    /// Read a JSON config file without checking its values, so overrides
    /// can still repair them before [`StimulusConfig::validate`].
    pub fn parse(path: &Path) -> Result<Self, StimulusError> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        info!("Loaded stimulus config from {}", path.display());
        Ok(config)
    }

    /// Read and validate a JSON config file; absent fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, StimulusError> {
        let config = Self::parse(path)?;
        config.validate()?;
        Ok(config)
    }

    /// File (or defaults) first, then `overrides`, validated once at the end.
    pub fn resolve(
        path: Option<&Path>,
        overrides: &StimulusOverrides,
    ) -> Result<Self, StimulusError> {
        let base = match path {
            Some(path) => Self::parse(path)?,
            None => Self::default(),
        };
        let config = base.with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn with_overrides(mut self, overrides: &StimulusOverrides) -> Self {
        if let Some(order) = overrides.order {
            self.order = order;
        }
        if let Some(seed) = &overrides.seed {
            self.seed = Some(seed.clone());
        }
        if let Some(bit_count) = overrides.bit_count {
            self.bit_count = bit_count;
        }
        if let Some(samples_per_bit) = overrides.samples_per_bit {
            self.samples_per_bit = samples_per_bit;
        }
        if let Some(v_high) = overrides.v_high {
            self.v_high = v_high;
        }
        if let Some(v_low) = overrides.v_low {
            self.v_low = v_low;
        }
        if let Some(sample_rate) = overrides.sample_rate {
            self.sample_rate = sample_rate;
        }
        self
    }

    pub fn from_json(text: &str) -> Result<Self, StimulusError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field without building anything.
    pub fn validate(&self) -> Result<(), InvalidArgument> {
        self.generator()?;
        let modulator = self.modulator()?;
        if modulator.samples_for_bits(self.bit_count).is_none() {
            return Err(InvalidArgument::Parameter {
                name: "bit_count * samples_per_bit",
                expected: "representable as a sample count",
                value: format!("{} * {}", self.bit_count, self.samples_per_bit),
            });
        }
        if self.sample_rate == 0 {
            return Err(InvalidArgument::Parameter {
                name: "sample_rate",
                expected: "at least 1 Hz",
                value: self.sample_rate.to_string(),
            });
        }
        Ok(())
    }

    pub fn generator(&self) -> Result<PrbsGenerator, InvalidArgument> {
        PrbsGenerator::from_seed_value(self.order, self.seed.as_ref())
    }

    pub fn modulator(&self) -> Result<NrzModulator, InvalidArgument> {
        NrzModulator::new(self.samples_per_bit, self.v_high, self.v_low)
    }
}
