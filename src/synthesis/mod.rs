//! Additive synthesis of tone recipes.
//!
//! A recipe is rendered in two steps: [`synthesize`] runs the partial-sum
//! voice in floating point, then the post-processing pipeline clips,
//! quantizes and fades the result into a [`SampleBuffer`].

mod recipe;
mod voice;

pub use recipe::{Click, Drift, Modulation, Partial, PingTrain, PitchSweep, Texture, ToneRecipe};
pub use voice::ToneVoice;

use crate::Signal;
use crate::processing::SampleBuffer;

/// Runs the voice for the recipe's full duration, without post-processing.
pub fn synthesize(recipe: &ToneRecipe<'_>) -> Vec<f64> {
    ToneVoice::new(recipe).take_samples(recipe.sample_count())
}

/// Renders a recipe into a finished, playable buffer.
///
/// # Examples
///
/// ```
/// use carillon::envelopes::Envelope;
/// use carillon::synthesis::{Partial, ToneRecipe, render};
///
/// const PARTIALS: &[Partial] = &[Partial::new(1.0, 1.0)];
/// let recipe = ToneRecipe::new(880.0, 0.25, Envelope::ExponentialDecay { attack: 0.005, decay: 0.3 }, 0.5)
///     .with_partials(PARTIALS);
///
/// let buffer = render(&recipe);
/// assert_eq!(buffer.len(), 11_025);
/// assert_eq!(buffer.samples()[0], 0);
/// ```
pub fn render(recipe: &ToneRecipe<'_>) -> SampleBuffer {
    debug_assert!(recipe.validate().is_ok(), "invalid recipe: {recipe:?}");
    SampleBuffer::from_raw(&synthesize(recipe), recipe.smoothing)
}
