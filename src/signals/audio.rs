//! Audio signal trait for sample-rate-aware signals.

use crate::{SAMPLE_RATE, Signal};

/// A signal that runs at the crate's fixed output sample rate.
///
/// Implementors get sample-index to time conversion for free, which is how
/// every tone voice derives `t` for its envelopes and partials.
///
/// # Examples
///
/// ```
/// use carillon::{AudioSignal, Signal};
///
/// struct Silence;
///
/// impl Signal for Silence {
///     fn next_sample(&mut self) -> f64 {
///         0.0
///     }
/// }
///
/// impl AudioSignal for Silence {}
///
/// assert_eq!(Silence.sample_rate(), 44100.0);
/// assert_eq!(Silence.time_at(22050), 0.5);
/// ```
pub trait AudioSignal: Signal {
    /// Samples per second, always [`SAMPLE_RATE`](crate::SAMPLE_RATE).
    fn sample_rate(&self) -> f64 {
        SAMPLE_RATE as f64
    }

    /// Elapsed time in seconds at the given sample index.
    fn time_at(&self, index: usize) -> f64 {
        index as f64 / self.sample_rate()
    }
}
