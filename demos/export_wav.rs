mod common;

use carillon::{SAMPLE_RATE, ToneId, generate};
use std::fs;
use std::path::Path;

/// Renders every tone to a 16-bit mono WAV file.
///
/// Usage: `cargo run --example export_wav [output_dir]`
fn main() -> Result<(), anyhow::Error> {
    common::init_tracing();

    let dir = common::arg_or(1, "tones");
    fs::create_dir_all(&dir)?;

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    for tone in ToneId::ALL {
        if tone.is_custom_recording() {
            continue;
        }
        let buffer = generate(tone);
        let path = Path::new(&dir).join(format!("{}.wav", tone.name()));
        let mut writer = hound::WavWriter::create(&path, spec)?;
        for &sample in buffer.samples() {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
        println!(
            "{} -> {} ({} samples, peak {})",
            common::describe(tone),
            path.display(),
            buffer.len(),
            buffer.peak()
        );
    }

    Ok(())
}
