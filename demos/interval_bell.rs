mod common;

use carillon::ToneId;
use carillon::playback::{CpalSink, SinkConfig, ToneSynthesizer};
use std::thread;
use std::time::Duration;

/// A minimal interval timer: rings a bell every N seconds for M rounds.
///
/// Usage: `cargo run --example interval_bell --features playback [tone] [seconds] [rounds]`
fn main() -> Result<(), anyhow::Error> {
    common::init_tracing();

    let tone: ToneId = common::arg_or(1, "mindful-bell").parse()?;
    let interval: u64 = common::arg_or(2, "10").parse()?;
    let rounds: u32 = common::arg_or(3, "3").parse()?;

    let synth = ToneSynthesizer::new(CpalSink::new(SinkConfig::default()))?;
    println!(
        "Ringing {} every {interval}s, {rounds} times",
        common::describe(tone)
    );

    for round in 1..=rounds {
        println!("Round {round}/{rounds}");
        if round < rounds {
            synth.play_tone(tone)?;
            thread::sleep(Duration::from_secs(interval));
        } else {
            // Let the final bell ring out
            common::play_to_end(&synth, tone)?;
        }
    }

    synth.release();
    Ok(())
}
