pub mod modulation;
pub mod prbs;
pub mod stimulus;
pub mod ui;
pub mod utils;

pub use modulation::{Modulator, NrzModulator};
pub use prbs::{InvalidArgument, PrbsGenerator, PrbsOrder};
pub use stimulus::{Stimulus, StimulusConfig, StimulusError, StimulusOverrides, generate};
