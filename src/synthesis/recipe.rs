//! Data-only description of how a tone is synthesized.
//!
//! A [`ToneRecipe`] is plain data: the voice in `voice.rs` interprets it one
//! sample at a time. The optional refinements (drift, sweep, click, texture)
//! are the knobs individual tones need on top of the plain partial sum.

use crate::SAMPLE_RATE;
use crate::envelopes::Envelope;
use crate::error::RecipeError;
use std::f64::consts::TAU;

/// One sinusoidal component of a tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partial {
    /// Multiplier of the recipe's base frequency.
    pub ratio: f64,
    /// Relative amplitude in (0, 1].
    pub amplitude: f64,
    /// Seconds after the start of the tone before this partial sounds.
    pub onset: f64,
    /// Seconds after onset at which the partial is cut off.
    pub lifetime: Option<f64>,
    /// Replaces the recipe envelope for this partial.
    pub envelope: Option<Envelope>,
    /// Envelope level is raised to this power; above 1 the partial dies out
    /// faster than the fundamental.
    pub envelope_exponent: f64,
    /// Rate of an extra `exp(-rate·τ)` decay layered on this partial.
    pub damping: Option<f64>,
    /// Amplitude beating applied to this partial only.
    pub beat: Option<Modulation>,
}

impl Partial {
    /// A partial at `ratio × base` that starts with the tone and follows the
    /// recipe envelope.
    pub const fn new(ratio: f64, amplitude: f64) -> Self {
        Self {
            ratio,
            amplitude,
            onset: 0.0,
            lifetime: None,
            envelope: None,
            envelope_exponent: 1.0,
            damping: None,
            beat: None,
        }
    }

    /// Starts the partial `onset` seconds into the tone.
    ///
    /// Envelope and phase both run on the partial's own clock.
    pub const fn delayed(mut self, onset: f64) -> Self {
        self.onset = onset;
        self
    }

    /// Silences the partial `lifetime` seconds after its onset.
    pub const fn until(mut self, lifetime: f64) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    /// Uses `envelope` instead of the recipe envelope.
    pub const fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = Some(envelope);
        self
    }

    /// Raises the envelope level to `exponent`.
    pub const fn with_envelope_exponent(mut self, exponent: f64) -> Self {
        self.envelope_exponent = exponent;
        self
    }

    /// Layers a fast `exp(-rate·τ)` decay on top of the envelope.
    pub const fn damped(mut self, rate: f64) -> Self {
        self.damping = Some(rate);
        self
    }

    /// Applies a slow amplitude beat to this partial.
    pub const fn with_beat(mut self, beat: Modulation) -> Self {
        self.beat = Some(beat);
        self
    }

    /// Contribution of this partial at tone time `t`.
    ///
    /// `frequency` is the (possibly swept or drifted) base frequency and
    /// `fallback` is the recipe envelope.
    pub fn sample(&self, fallback: &Envelope, frequency: f64, t: f64) -> f64 {
        let tau = t - self.onset;
        if tau < 0.0 {
            return 0.0;
        }
        if self.lifetime.is_some_and(|lifetime| tau >= lifetime) {
            return 0.0;
        }

        let mut level = self.envelope.as_ref().unwrap_or(fallback).level(tau);
        if self.envelope_exponent != 1.0 {
            level = level.powf(self.envelope_exponent);
        }
        if let Some(rate) = self.damping {
            level *= (-rate * tau).exp();
        }
        if let Some(beat) = self.beat {
            level *= beat.value(t);
        }

        self.amplitude * level * (TAU * frequency * self.ratio * tau).sin()
    }

    fn validate(&self, index: usize) -> Result<(), RecipeError> {
        let name = |field: &str| format!("partials[{index}].{field}");
        if !(self.ratio > 0.0 && self.ratio.is_finite()) {
            return Err(RecipeError::invalid_param(name("ratio"), "must be positive"));
        }
        if !(self.amplitude > 0.0 && self.amplitude <= 1.0) {
            return Err(RecipeError::invalid_param(
                name("amplitude"),
                "must be in (0, 1]",
            ));
        }
        if !(self.onset >= 0.0 && self.onset.is_finite()) {
            return Err(RecipeError::invalid_param(name("onset"), "must be non-negative"));
        }
        if self.lifetime.is_some_and(|lifetime| lifetime <= 0.0) {
            return Err(RecipeError::invalid_param(name("lifetime"), "must be positive"));
        }
        if self.envelope_exponent <= 0.0 {
            return Err(RecipeError::invalid_param(
                name("envelope_exponent"),
                "must be positive",
            ));
        }
        if self.damping.is_some_and(|rate| rate <= 0.0) {
            return Err(RecipeError::invalid_param(name("damping"), "must be positive"));
        }
        if let Some(envelope) = &self.envelope {
            validate_envelope(envelope, &name("envelope"))?;
        }
        Ok(())
    }
}

/// A slow sinusoidal gain term `center + depth·sin(2π·rate·t)`.
///
/// Covers shimmer, tremolo, beating and slow filter-sweep style movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modulation {
    /// Gain at the zero crossings of the sine.
    pub center: f64,
    /// Swing either side of `center`.
    pub depth: f64,
    /// Rate in Hz.
    pub rate: f64,
}

impl Modulation {
    /// A gain term swinging `depth` around `center` at `rate` Hz.
    pub const fn new(center: f64, depth: f64, rate: f64) -> Self {
        Self {
            center,
            depth,
            rate,
        }
    }

    /// Tremolo around unity gain: `1 + depth·sin(2π·rate·t)`.
    pub const fn tremolo(depth: f64, rate: f64) -> Self {
        Self::new(1.0, depth, rate)
    }

    /// Gain at time `t`.
    pub fn value(&self, t: f64) -> f64 {
        self.center + self.depth * (TAU * self.rate * t).sin()
    }
}

/// Slow detuning of every partial: frequency × `1 + depth·sin(rate·t)`.
///
/// `rate` is in radians per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drift {
    /// Fractional detune at the peaks.
    pub depth: f64,
    pub rate: f64,
}

impl Drift {
    /// Frequency multiplier at time `t`.
    pub fn factor(&self, t: f64) -> f64 {
        1.0 + (t * self.rate).sin() * self.depth
    }
}

/// Quadratic glide of the base frequency towards `target` over `time` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchSweep {
    /// Final frequency in Hz.
    pub target: f64,
    /// Glide length in seconds.
    pub time: f64,
}

impl PitchSweep {
    /// Base frequency at time `t` for a glide starting at `start` Hz.
    pub fn frequency(&self, start: f64, t: f64) -> f64 {
        let progress = t / self.time;
        if progress < 1.0 {
            start + (self.target - start) * progress * progress
        } else {
            self.target
        }
    }
}

/// A linearly decaying offset added at the start of the tone, heard as a
/// knock or click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Click {
    /// Offset at `t = 0`.
    pub level: f64,
    /// Seconds until the offset reaches zero.
    pub length: f64,
}

impl Click {
    /// Offset at time `t`, zero outside `[0, length)`.
    pub fn value(&self, t: f64) -> f64 {
        if (0.0..self.length).contains(&t) {
            self.level * (1.0 - t / self.length)
        } else {
            0.0
        }
    }
}

/// A regular train of short, bright, exponentially decaying pings.
///
/// Ping `k` starts at `first_onset + k·spacing` with frequency
/// `frequency + k·frequency_step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PingTrain {
    pub count: usize,
    /// Start of the first ping in seconds.
    pub first_onset: f64,
    /// Seconds between ping onsets.
    pub spacing: f64,
    /// Frequency of the first ping in Hz.
    pub frequency: f64,
    /// Added to the frequency of each following ping.
    pub frequency_step: f64,
    /// Exponential decay rate, per second.
    pub decay_rate: f64,
    /// A ping is silent once it is this many seconds old.
    pub lifetime: f64,
    pub level: f64,
}

impl PingTrain {
    /// Sum of every ping sounding at time `t`.
    pub fn value(&self, t: f64) -> f64 {
        (0..self.count)
            .map(|k| {
                let ping_t = t - (k as f64 * self.spacing + self.first_onset);
                if ping_t > 0.0 && ping_t < self.lifetime {
                    let freq = self.frequency + k as f64 * self.frequency_step;
                    self.level * (-ping_t * self.decay_rate).exp() * (TAU * freq * ping_t).sin()
                } else {
                    0.0
                }
            })
            .sum()
    }
}

/// Seeded noise bed with pings, for tones that are not purely tonal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Texture {
    /// Seed of the noise generator. The same seed renders the same bytes.
    pub seed: u64,
    /// Amplitude of the white noise bed.
    pub noise_level: f64,
    pub pings: Option<PingTrain>,
}

/// Everything needed to synthesize one tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneRecipe<'a> {
    /// Base frequency in Hz; partial ratios multiply it.
    pub base_frequency: f64,
    /// Length of the tone in seconds.
    pub duration: f64,
    /// Sine components summed into the tone.
    pub partials: &'a [Partial],
    /// Envelope applied to partials without their own, and to the click and
    /// texture layers.
    pub envelope: Envelope,
    /// Gain term applied to the summed partials.
    pub modulation: Option<Modulation>,
    /// Detuning shared by every partial.
    pub drift: Option<Drift>,
    /// Glide of the base frequency.
    pub sweep: Option<PitchSweep>,
    pub click: Option<Click>,
    /// Noise and pings, shaped by `envelope`.
    pub texture: Option<Texture>,
    /// Output gain applied before soft clipping.
    pub gain: f64,
    /// Run the 3-tap smoothing filter after quantizing.
    pub smoothing: bool,
}

impl<'a> ToneRecipe<'a> {
    /// A recipe with no partials and no refinements.
    pub const fn new(base_frequency: f64, duration: f64, envelope: Envelope, gain: f64) -> Self {
        Self {
            base_frequency,
            duration,
            partials: &[],
            envelope,
            modulation: None,
            drift: None,
            sweep: None,
            click: None,
            texture: None,
            gain,
            smoothing: false,
        }
    }

    /// Sets the partials to sum.
    pub const fn with_partials(mut self, partials: &'a [Partial]) -> Self {
        self.partials = partials;
        self
    }

    /// Multiplies the summed partials by `modulation`.
    pub const fn with_modulation(mut self, modulation: Modulation) -> Self {
        self.modulation = Some(modulation);
        self
    }

    /// Detunes every partial by `1 + depth·sin(rate·t)`.
    pub const fn with_drift(mut self, depth: f64, rate: f64) -> Self {
        self.drift = Some(Drift { depth, rate });
        self
    }

    /// Glides the base frequency to `target` over `time` seconds.
    pub const fn with_sweep(mut self, target: f64, time: f64) -> Self {
        self.sweep = Some(PitchSweep { target, time });
        self
    }

    /// Adds a knock of `level` lasting `length` seconds.
    pub const fn with_click(mut self, level: f64, length: f64) -> Self {
        self.click = Some(Click { level, length });
        self
    }

    /// Adds a noise and ping layer.
    pub const fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Runs the 3-tap smoothing filter over the finished samples.
    pub const fn smoothed(mut self) -> Self {
        self.smoothing = true;
        self
    }

    /// Number of samples the rendered tone holds: `round(duration × rate)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use carillon::envelopes::Envelope;
    /// use carillon::synthesis::ToneRecipe;
    ///
    /// let env = Envelope::ExponentialDecay { attack: 0.01, decay: 2.5 };
    /// let recipe = ToneRecipe::new(528.0, 3.0, env, 0.5);
    /// assert_eq!(recipe.sample_count(), 132_300);
    /// ```
    pub fn sample_count(&self) -> usize {
        (self.duration * SAMPLE_RATE as f64).round() as usize
    }

    /// Checks that every parameter is in range.
    pub fn validate(&self) -> Result<(), RecipeError> {
        if !(self.duration > 0.0 && self.duration.is_finite()) {
            return Err(RecipeError::InvalidDuration {
                duration: self.duration,
            });
        }
        if !(self.base_frequency > 0.0 && self.base_frequency.is_finite()) {
            return Err(RecipeError::InvalidFrequency {
                freq: self.base_frequency,
            });
        }
        if !(self.gain > 0.0 && self.gain.is_finite()) {
            return Err(RecipeError::invalid_param("gain", "must be positive"));
        }
        validate_envelope(&self.envelope, "envelope")?;
        for (index, partial) in self.partials.iter().enumerate() {
            partial.validate(index)?;
        }
        if self.partials.is_empty() && self.texture.is_none() {
            return Err(RecipeError::invalid_param(
                "partials",
                "a tone needs partials or a texture",
            ));
        }
        if let Some(sweep) = self.sweep {
            if !(sweep.target > 0.0 && sweep.time > 0.0) {
                return Err(RecipeError::invalid_param(
                    "sweep",
                    "target and time must be positive",
                ));
            }
        }
        if let Some(click) = self.click {
            if click.length <= 0.0 {
                return Err(RecipeError::invalid_param("click.length", "must be positive"));
            }
        }
        if let Some(texture) = self.texture {
            if texture.noise_level < 0.0 {
                return Err(RecipeError::invalid_param(
                    "texture.noise_level",
                    "must not be negative",
                ));
            }
            if let Some(pings) = texture.pings {
                if pings.lifetime <= 0.0 || pings.decay_rate <= 0.0 {
                    return Err(RecipeError::invalid_param(
                        "texture.pings",
                        "lifetime and decay rate must be positive",
                    ));
                }
            }
        }
        Ok(())
    }
}

fn validate_envelope(envelope: &Envelope, name: &str) -> Result<(), RecipeError> {
    if envelope.attack() < 0.0 {
        return Err(RecipeError::invalid_param(
            format!("{name}.attack"),
            "must not be negative",
        ));
    }
    let (param, value) = envelope.time_constant();
    if !(value > 0.0 && value.is_finite()) {
        return Err(RecipeError::invalid_param(
            format!("{name}.{param}"),
            "must be positive",
        ));
    }
    Ok(())
}
