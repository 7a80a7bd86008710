/// Log level (overridden by RUST_LOG)
pub const LOG_LEVEL: &str = "info";

// ============================================================================
// Stimulus defaults
// ============================================================================

/// Bits generated when no count is given: one PRBS7 period
pub const DEFAULT_BIT_COUNT: usize = 127;

/// NRZ oversampling factor
pub const DEFAULT_SAMPLES_PER_BIT: usize = 32;

/// NRZ level for a 1 bit
pub const DEFAULT_V_HIGH: f32 = 1.0;

/// NRZ level for a 0 bit
pub const DEFAULT_V_LOW: f32 = -1.0;

/// Sample rate written into WAV headers (Hz)
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;

/// Bits generated per step of the CLI progress bar
pub const GENERATION_CHUNK_BITS: usize = 1 << 16;
