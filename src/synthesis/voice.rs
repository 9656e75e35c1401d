//! The partial-sum interpreter.

use super::recipe::ToneRecipe;
use crate::noise::WhiteNoise;
use crate::{AudioSignal, Signal};

/// Renders a [`ToneRecipe`] one sample at a time.
///
/// Each sample at `t = i / rate` is
///
/// ```text
/// gain × ( Σ partials × modulation(t) + (click(t) + texture(t)) × envelope(t) )
/// ```
///
/// The voice keeps producing samples past the recipe duration; callers decide
/// how many to take.
///
/// # Examples
///
/// ```
/// use carillon::envelopes::Envelope;
/// use carillon::synthesis::{Partial, ToneRecipe, ToneVoice};
/// use carillon::Signal;
///
/// const PARTIALS: &[Partial] = &[Partial::new(1.0, 1.0), Partial::new(2.0, 0.3)];
/// let recipe = ToneRecipe::new(440.0, 0.5, Envelope::Soft { attack: 0.05, hold: 0.1, release: 0.3 }, 0.5)
///     .with_partials(PARTIALS);
///
/// let mut voice = ToneVoice::new(&recipe);
/// let samples = voice.take_samples(recipe.sample_count());
/// assert_eq!(samples.len(), 22_050);
/// assert_eq!(samples[0], 0.0);
/// ```
pub struct ToneVoice<'a> {
    recipe: &'a ToneRecipe<'a>,
    index: usize,
    noise: Option<WhiteNoise>,
}

impl<'a> ToneVoice<'a> {
    /// Starts a voice at sample 0, seeding the noise layer if the recipe has one.
    pub fn new(recipe: &'a ToneRecipe<'a>) -> Self {
        let noise = recipe
            .texture
            .map(|texture| WhiteNoise::seeded(texture.seed));
        Self {
            recipe,
            index: 0,
            noise,
        }
    }
}

impl Signal for ToneVoice<'_> {
    fn next_sample(&mut self) -> f64 {
        let t = self.time_at(self.index);
        self.index += 1;
        let recipe = self.recipe;

        let mut frequency = match recipe.sweep {
            Some(sweep) => sweep.frequency(recipe.base_frequency, t),
            None => recipe.base_frequency,
        };
        if let Some(drift) = recipe.drift {
            frequency *= drift.factor(t);
        }

        let mut tonal: f64 = recipe
            .partials
            .iter()
            .map(|partial| partial.sample(&recipe.envelope, frequency, t))
            .sum();
        if let Some(modulation) = recipe.modulation {
            tonal *= modulation.value(t);
        }

        // Layers shaped only by the recipe envelope
        let mut layers = 0.0;
        if let Some(click) = recipe.click {
            layers += click.value(t);
        }
        if let Some(texture) = recipe.texture {
            // Draw every sample so the noise stream never depends on the envelope
            if let Some(noise) = self.noise.as_mut() {
                layers += texture.noise_level * noise.next_sample();
            }
            if let Some(pings) = texture.pings {
                layers += pings.value(t);
            }
        }
        if layers != 0.0 {
            tonal += layers * recipe.envelope.level(t);
        }

        tonal * recipe.gain
    }
}

impl AudioSignal for ToneVoice<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelopes::Envelope;
    use crate::synthesis::{Modulation, Partial, PingTrain, Texture};

    const BELL: Envelope = Envelope::ExponentialDecay {
        attack: 0.01,
        decay: 2.0,
    };
    const FUNDAMENTAL: &[Partial] = &[Partial::new(1.0, 1.0)];

    #[test]
    fn test_first_sample_is_silent() {
        let recipe = ToneRecipe::new(440.0, 1.0, BELL, 0.5).with_partials(FUNDAMENTAL);
        let mut voice = ToneVoice::new(&recipe);
        assert_eq!(voice.next_sample(), 0.0);
        assert!(voice.next_sample() > 0.0);
    }

    #[test]
    fn test_matches_closed_form() {
        let recipe = ToneRecipe::new(440.0, 1.0, BELL, 0.5).with_partials(FUNDAMENTAL);
        let samples = ToneVoice::new(&recipe).take_samples(4410);
        for (i, sample) in samples.iter().enumerate() {
            let t = i as f64 / 44100.0;
            let expected =
                0.5 * BELL.level(t) * (std::f64::consts::TAU * 440.0 * t).sin();
            assert!((sample - expected).abs() < 1e-9, "sample {i}");
        }
    }

    #[test]
    fn test_gain_scales_linearly() {
        let quiet = ToneRecipe::new(330.0, 1.0, BELL, 0.25).with_partials(FUNDAMENTAL);
        let loud = ToneRecipe::new(330.0, 1.0, BELL, 0.5).with_partials(FUNDAMENTAL);
        let a = ToneVoice::new(&quiet).take_samples(1000);
        let b = ToneVoice::new(&loud).take_samples(1000);
        for (x, y) in a.iter().zip(&b) {
            assert!((x * 2.0 - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_modulation_multiplies_partials() {
        let plain = ToneRecipe::new(220.0, 1.0, BELL, 0.5).with_partials(FUNDAMENTAL);
        let shimmer = plain.with_modulation(Modulation::tremolo(0.03, 5.5));
        let a = ToneVoice::new(&plain).take_samples(2000);
        let b = ToneVoice::new(&shimmer).take_samples(2000);
        for (i, (x, y)) in a.iter().zip(&b).enumerate() {
            let t = i as f64 / 44100.0;
            let m = 1.0 + 0.03 * (std::f64::consts::TAU * 5.5 * t).sin();
            assert!((x * m - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_click_follows_envelope() {
        let recipe = ToneRecipe::new(
            280.0,
            0.6,
            Envelope::Percussive {
                attack: 0.002,
                decay: 0.4,
            },
            1.0,
        )
        .with_click(0.5, 0.01);
        // No partials: only the click is heard, and only for 10ms
        let samples = ToneVoice::new(&recipe).take_samples(1000);
        assert!(samples[100] > 0.0);
        assert!(samples[500..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_texture_is_reproducible() {
        let texture = Texture {
            seed: 42,
            noise_level: 0.15,
            pings: Some(PingTrain {
                count: 3,
                first_onset: 0.05,
                spacing: 0.12,
                frequency: 1500.0,
                frequency_step: 200.0,
                decay_rate: 12.0,
                lifetime: 0.3,
                level: 0.2,
            }),
        };
        let recipe = ToneRecipe::new(
            1500.0,
            1.0,
            Envelope::Swell {
                attack: 0.3,
                total: 1.0,
            },
            0.5,
        )
        .with_texture(texture);
        let a = ToneVoice::new(&recipe).take_samples(20_000);
        let b = ToneVoice::new(&recipe).take_samples(20_000);
        assert_eq!(a, b);
        assert!(a[10_000..].iter().any(|&s| s != 0.0));
    }
}
