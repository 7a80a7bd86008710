use super::{Stimulus, StimulusError};
use crate::utils::dump::StimulusDump;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

fn create(path: &Path) -> Result<BufWriter<File>, StimulusError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

impl From<&Stimulus> for StimulusDump {
    fn from(stimulus: &Stimulus) -> Self {
        Self {
            order: stimulus.order.degree(),
            taps: stimulus.order.taps(),
            seed: stimulus.seed,
            bit_count: stimulus.bits.len(),
            samples_per_bit: stimulus.modulator.samples_per_bit(),
            v_high: stimulus.modulator.v_high(),
            v_low: stimulus.modulator.v_low(),
            bits: stimulus.bits.clone(),
            waveform: stimulus.waveform.clone(),
        }
    }
}

pub fn write_json(stimulus: &Stimulus, path: &Path) -> Result<(), StimulusError> {
    let mut writer = create(path)?;
    serde_json::to_writer_pretty(&mut writer, &StimulusDump::from(stimulus))?;
    writer.flush()?;
    info!("Wrote JSON dump to {}", path.display());
    Ok(())
}

pub fn read_json(path: &Path) -> Result<StimulusDump, StimulusError> {
    let reader = std::io::BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Mono 16-bit PCM; samples outside [-1, 1] are clipped.
pub fn write_wav(signal: &[f32], sample_rate: u32, path: &Path) -> Result<(), StimulusError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    let amplitude = i16::MAX as f32;
    for &sample in signal {
        writer.write_sample((sample.clamp(-1.0, 1.0) * amplitude) as i16)?;
    }
    writer.finalize()?;
    info!(
        "Wrote {} samples at {} Hz to {}",
        signal.len(),
        sample_rate,
        path.display()
    );
    Ok(())
}

/// One `0`/`1` per line
pub fn write_bits_txt(bits: &[u8], path: &Path) -> Result<(), StimulusError> {
    let mut file = create(path)?;
    for &bit in bits {
        writeln!(file, "{}", bit)?;
    }
    file.flush()?;
    info!("Wrote {} bits to {}", bits.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modulation::NrzModulator;
    use crate::prbs::PrbsOrder;
    use crate::stimulus::StimulusConfig;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("prbsgen-rs-tests")
            .join(format!("{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_json_round_trip() {
        let dir = scratch_dir("json");
        let path = dir.join("nested").join("stim.json");
        let config = StimulusConfig {
            order: PrbsOrder::Prbs9,
            bit_count: 30,
            samples_per_bit: 2,
            ..Default::default()
        };
        let stimulus = Stimulus::build(&config).unwrap();

        write_json(&stimulus, &path).unwrap();
        let dump = read_json(&path).unwrap();
        assert_eq!(dump, StimulusDump::from(&stimulus));
        assert_eq!(dump.order, 9);
        assert_eq!(dump.taps, (9, 5));
        assert_eq!(dump.seed, 0x1FF);
        assert_eq!(dump.waveform.len(), 60);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_wav_levels() {
        let dir = scratch_dir("wav");
        let path = dir.join("stim.wav");
        let nrz = NrzModulator::new(2, 1.0, -1.0).unwrap();
        let stimulus = Stimulus::from_bits(PrbsOrder::Prbs7, 0x7F, vec![1, 0], nrz);

        write_wav(&stimulus.waveform, 8000, &path).unwrap();
        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 8000);
        assert_eq!(reader.spec().channels, 1);
        let samples: Vec<i16> = reader
            .into_samples::<i16>()
            .map(|s| s.unwrap())
            .collect();
        assert_eq!(samples, [i16::MAX, i16::MAX, -i16::MAX, -i16::MAX]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_bits_txt() {
        let dir = scratch_dir("txt");
        let path = dir.join("bits.txt");
        write_bits_txt(&[1, 0, 0, 1], &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "1\n0\n0\n1\n");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
