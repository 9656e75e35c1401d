//! Delivering rendered tones to an audio device.
//!
//! [`ToneSynthesizer`] is the front end: it accepts tone requests from any
//! thread and drives an [`AudioSink`]. With the `playback` feature,
//! [`CpalSink`] plays through the system's audio output.

#[cfg(feature = "playback")]
mod output;
mod sink;
mod synthesizer;

#[cfg(feature = "playback")]
pub use output::{CpalPlayback, CpalSink};
pub use sink::{AudioSink, OutputCategory, OutputFormat, PlaybackHandle, SinkConfig};
pub use synthesizer::ToneSynthesizer;
