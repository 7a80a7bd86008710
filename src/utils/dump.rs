use serde::{Deserialize, Serialize};

/// On-disk form of a stimulus run, consumed by the eye-diagram tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StimulusDump {
    pub order: u32,
    pub taps: (u32, u32),
    pub seed: u32,
    pub bit_count: usize,
    pub samples_per_bit: usize,
    pub v_high: f32,
    pub v_low: f32,
    pub bits: Vec<u8>,
    pub waveform: Vec<f32>,
}
