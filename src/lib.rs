//! Carillon - procedural bell and notification tones
//!
//! Every tone is synthesized from scratch: a [`ToneId`] selects a static
//! recipe of sinusoidal partials and an envelope, the partial-sum voice
//! renders it in floating point, and post-processing soft clips, quantizes
//! and fades it into a mono 16-bit [`SampleBuffer`] at 44.1 kHz.
//!
//! ```
//! use carillon::{ToneId, generate};
//!
//! let bell = generate(ToneId::TibetanBowl);
//! assert_eq!(bell.len(), 132_300);
//! assert_eq!(bell, generate(ToneId::TibetanBowl));
//! ```
//!
//! For playback, [`ToneSynthesizer`] renders on a background thread and
//! plays through an [`AudioSink`](playback::AudioSink). Enable the
//! `playback` feature for the cpal-backed sink.

pub mod catalog;
pub mod envelopes;
pub mod error;
pub mod noise;
pub mod playback;
pub mod processing;
pub mod signals;
pub mod synthesis;

/// Output sample rate of every rendered tone, in Hz.
pub const SAMPLE_RATE: u32 = 44_100;

// Re-export commonly used types at the crate root
pub use catalog::{ToneCategory, ToneId, generate, recipe_for};
pub use envelopes::Envelope;
pub use error::{PlaybackError, RecipeError, ToneError, ToneResult};
pub use playback::ToneSynthesizer;
pub use processing::SampleBuffer;
pub use signals::{AudioSignal, Signal};
pub use synthesis::{Partial, ToneRecipe, render};
