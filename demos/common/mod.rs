//! Common utilities for the demo programs.

#![allow(dead_code)]

use anyhow::Result;
use carillon::ToneId;
use carillon::playback::{AudioSink, ToneSynthesizer};
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Requests `tone` and blocks until it has played out.
///
/// Returns the device error if the tone could not be started.
pub fn play_to_end<S: AudioSink>(synth: &ToneSynthesizer<S>, tone: ToneId) -> Result<()> {
    synth.play_tone(tone)?;
    synth.wait_until_idle();
    if let Some(err) = synth.take_last_error() {
        return Err(err.into());
    }
    while synth.is_playing() {
        thread::sleep(Duration::from_millis(20));
    }
    Ok(())
}

/// Positional argument `index`, or `default` when absent.
pub fn arg_or(index: usize, default: &str) -> String {
    std::env::args()
        .nth(index)
        .unwrap_or_else(|| default.to_string())
}

/// Prints a tone the way a picker menu would show it.
pub fn describe(tone: ToneId) -> String {
    format!(
        "{} {} ({:?}, {:.1}s)",
        tone.emoji(),
        tone.display_name(),
        tone.category(),
        tone.recipe().duration
    )
}
