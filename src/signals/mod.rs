//! Signal processing traits.
//!
//! Everything that produces audio in this crate, from the seeded noise source to
//! a full tone voice, is a [`Signal`]: a generator that yields one floating
//! point sample per call. [`AudioSignal`] ties a signal to the fixed output
//! sample rate so time can be derived from a sample index.

mod audio;
mod signal;

pub use audio::AudioSignal;
pub use signal::Signal;
