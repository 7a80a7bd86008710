// NRZ: 1 -> v_high, everything else -> v_low, held for samples_per_bit samples

use super::Modulator;
use crate::prbs::InvalidArgument;
use crate::utils::consts::{DEFAULT_SAMPLES_PER_BIT, DEFAULT_V_HIGH, DEFAULT_V_LOW};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NrzModulator {
    samples_per_bit: usize,
    v_high: f32,
    v_low: f32,
}

impl NrzModulator {
    pub fn new(samples_per_bit: usize, v_high: f32, v_low: f32) -> Result<Self, InvalidArgument> {
        if samples_per_bit == 0 {
            return Err(InvalidArgument::Parameter {
                name: "samples_per_bit",
                expected: "at least 1",
                value: samples_per_bit.to_string(),
            });
        }
        if !v_high.is_finite() || !v_low.is_finite() {
            return Err(InvalidArgument::Parameter {
                name: "v_high/v_low",
                expected: "finite",
                value: format!("{v_high}/{v_low}"),
            });
        }
        Ok(Self {
            samples_per_bit,
            v_high,
            v_low,
        })
    }

    /// Voltage level for a single bit
    pub fn level(&self, bit: u8) -> f32 {
        if bit == 1 { self.v_high } else { self.v_low }
    }

    pub fn samples_per_bit(&self) -> usize {
        self.samples_per_bit
    }

    pub fn v_high(&self) -> f32 {
        self.v_high
    }

    pub fn v_low(&self) -> f32 {
        self.v_low
    }

    /// Waveform length for `num_bits`; `None` if it does not fit in `usize`.
    pub fn samples_for_bits(&self, num_bits: usize) -> Option<usize> {
        num_bits.checked_mul(self.samples_per_bit)
    }
}

impl Default for NrzModulator {
    fn default() -> Self {
        Self {
            samples_per_bit: DEFAULT_SAMPLES_PER_BIT,
            v_high: DEFAULT_V_HIGH,
            v_low: DEFAULT_V_LOW,
        }
    }
}

impl Modulator for NrzModulator {
    fn name(&self) -> &'static str {
        "NRZ"
    }

    fn encode(&self, bits: &[u8]) -> Vec<f32> {
        // an overflowing length could never be allocated; let the Vec grow
        let mut samples =
            Vec::with_capacity(self.samples_for_bits(bits.len()).unwrap_or(0));
        for &bit in bits {
            let level = self.level(bit);
            samples.extend(std::iter::repeat_n(level, self.samples_per_bit));
        }
        samples
    }
}
