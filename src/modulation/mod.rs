// Bit -> level mapping for stimulus waveforms

pub mod nrz;

pub use nrz::NrzModulator;

/// Maps a bit sequence to waveform samples.
pub trait Modulator {
    fn name(&self) -> &'static str;

    fn encode(&self, bits: &[u8]) -> Vec<f32>;
}
