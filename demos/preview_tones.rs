mod common;

use carillon::ToneId;
use carillon::playback::{CpalSink, OutputCategory, SinkConfig, ToneSynthesizer};

/// Plays every synthesized tone once, in menu order.
///
/// Usage: `cargo run --example preview_tones --features playback [device]`
fn main() -> Result<(), anyhow::Error> {
    common::init_tracing();

    let mut config = SinkConfig::default().with_category(OutputCategory::Notification);
    if let Some(device) = std::env::args().nth(1) {
        config = config.with_device(device);
    }
    let synth = ToneSynthesizer::new(CpalSink::new(config))?;

    for tone in ToneId::ALL {
        if tone.is_custom_recording() {
            continue;
        }
        println!("{}", common::describe(tone));
        common::play_to_end(&synth, tone)?;
        std::thread::sleep(std::time::Duration::from_millis(300));
    }

    synth.release();
    Ok(())
}
