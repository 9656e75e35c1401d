//! Named amplitude envelopes.
//!
//! Each shape is available both as a free function of `(t, params)` and as a
//! variant of [`Envelope`], the data-only form stored in tone recipes.
//! Before `t = 0` every envelope is silent.

use super::curve::Ramp;
use std::f64::consts::PI;

/// Release length of the swell envelope, independent of the total duration.
const SWELL_FADE_OUT: f64 = 0.4;

/// Share of the total duration used by the pad release.
const PAD_RELEASE_FRACTION: f64 = 0.3;

/// Linear attack, then a single exponential decay.
///
/// Models a struck resonant body: bowls, bells, chimes.
///
/// # Examples
///
/// ```
/// use carillon::envelopes::exponential_decay;
///
/// assert_eq!(exponential_decay(0.0, 0.01, 2.0), 0.0);
/// assert_eq!(exponential_decay(0.005, 0.01, 2.0), 0.5);
/// assert_eq!(exponential_decay(0.01, 0.01, 2.0), 1.0);
/// ```
pub fn exponential_decay(t: f64, attack: f64, decay: f64) -> f64 {
    if t < 0.0 {
        return 0.0;
    }
    if t < attack {
        return Ramp::Linear.rise(t, attack);
    }
    (-(t - attack) / decay).exp()
}

/// Exponential decay with an extra fast term that sharpens the transient.
pub fn percussive(t: f64, attack: f64, decay: f64) -> f64 {
    if t < 0.0 {
        return 0.0;
    }
    if t < attack {
        return Ramp::Linear.rise(t, attack);
    }
    let dt = t - attack;
    (-dt / decay).exp() * (1.0 - 0.3 * (1.0 - (-dt * 10.0).exp()))
}

/// Smooth rise, flat hold, smooth release.
///
/// Used for short alert tones where the level must return to zero.
pub fn soft(t: f64, attack: f64, hold: f64, release: f64) -> f64 {
    if t < 0.0 {
        return 0.0;
    }
    if t < attack {
        Ramp::Smooth.rise(t, attack)
    } else if t < attack + hold {
        1.0
    } else {
        Ramp::Smooth.fall(t - attack - hold, release)
    }
}

/// Smooth attack and a plateau, released over the last 30% of `total`.
pub fn pad(t: f64, attack: f64, total: f64) -> f64 {
    plateau(t, attack, total, total * PAD_RELEASE_FRACTION)
}

/// Smooth attack, then a decay carrying a damped secondary swell.
///
/// The swell `1 + 0.15·sin(π·Δt/0.3)·exp(-2Δt)` adds the bump a gong makes
/// shortly after the strike.
pub fn gong(t: f64, attack: f64, decay: f64) -> f64 {
    if t < 0.0 {
        return 0.0;
    }
    if t < attack {
        return Ramp::Smooth.rise(t, attack);
    }
    let dt = t - attack;
    let swell = 1.0 + 0.15 * (PI * dt / 0.3).sin() * (-dt * 2.0).exp();
    swell * (-dt / decay).exp()
}

/// Linear attack, then a fast decay blended with a slower sustain.
pub fn kalimba(t: f64, attack: f64, decay: f64) -> f64 {
    if t < 0.0 {
        return 0.0;
    }
    if t < attack {
        return Ramp::Linear.rise(t, attack);
    }
    let dt = t - attack;
    0.7 * (-dt / (decay * 0.3)).exp() + 0.3 * (-dt / decay).exp()
}

/// Smooth attack, plateau, and a fixed 0.4 s release that ends at `total`.
pub fn swell(t: f64, attack: f64, total: f64) -> f64 {
    plateau(t, attack, total, SWELL_FADE_OUT)
}

fn plateau(t: f64, attack: f64, total: f64, release: f64) -> f64 {
    if t < 0.0 {
        return 0.0;
    }
    let release_start = total - release;
    if t < attack {
        Ramp::Smooth.rise(t, attack)
    } else if t < release_start {
        1.0
    } else {
        Ramp::Smooth.fall(t - release_start, release)
    }
}

/// A named envelope shape together with its parameters.
///
/// All times are in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Envelope {
    /// See [`exponential_decay`]
    ExponentialDecay { attack: f64, decay: f64 },
    /// See [`percussive`]
    Percussive { attack: f64, decay: f64 },
    /// See [`soft`]
    Soft { attack: f64, hold: f64, release: f64 },
    /// See [`pad`]
    Pad { attack: f64, total: f64 },
    /// See [`gong`]
    Gong { attack: f64, decay: f64 },
    /// See [`kalimba`]
    Kalimba { attack: f64, decay: f64 },
    /// See [`swell`]
    Swell { attack: f64, total: f64 },
}

impl Envelope {
    /// Amplitude multiplier at `t` seconds after the envelope starts.
    ///
    /// # Examples
    ///
    /// ```
    /// use carillon::envelopes::Envelope;
    ///
    /// let env = Envelope::Soft { attack: 0.05, hold: 0.15, release: 0.5 };
    /// assert_eq!(env.level(0.1), 1.0);
    /// assert_eq!(env.level(1.0), 0.0);
    /// ```
    pub fn level(&self, t: f64) -> f64 {
        match *self {
            Envelope::ExponentialDecay { attack, decay } => exponential_decay(t, attack, decay),
            Envelope::Percussive { attack, decay } => percussive(t, attack, decay),
            Envelope::Soft {
                attack,
                hold,
                release,
            } => soft(t, attack, hold, release),
            Envelope::Pad { attack, total } => pad(t, attack, total),
            Envelope::Gong { attack, decay } => gong(t, attack, decay),
            Envelope::Kalimba { attack, decay } => kalimba(t, attack, decay),
            Envelope::Swell { attack, total } => swell(t, attack, total),
        }
    }

    /// Length of the attack segment.
    pub fn attack(&self) -> f64 {
        match *self {
            Envelope::ExponentialDecay { attack, .. }
            | Envelope::Percussive { attack, .. }
            | Envelope::Soft { attack, .. }
            | Envelope::Pad { attack, .. }
            | Envelope::Gong { attack, .. }
            | Envelope::Kalimba { attack, .. }
            | Envelope::Swell { attack, .. } => attack,
        }
    }

    /// The time constant that must be strictly positive for the shape to be
    /// well defined, with its parameter name.
    pub(crate) fn time_constant(&self) -> (&'static str, f64) {
        match *self {
            Envelope::ExponentialDecay { decay, .. }
            | Envelope::Percussive { decay, .. }
            | Envelope::Gong { decay, .. }
            | Envelope::Kalimba { decay, .. } => ("decay", decay),
            Envelope::Soft { release, .. } => ("release", release),
            Envelope::Pad { total, .. } | Envelope::Swell { total, .. } => ("total", total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_silent_before_start() {
        let shapes = [
            Envelope::ExponentialDecay { attack: 0.01, decay: 2.0 },
            Envelope::Percussive { attack: 0.01, decay: 2.0 },
            Envelope::Soft { attack: 0.01, hold: 0.1, release: 0.2 },
            Envelope::Pad { attack: 0.3, total: 1.5 },
            Envelope::Gong { attack: 0.02, decay: 3.0 },
            Envelope::Kalimba { attack: 0.001, decay: 1.5 },
            Envelope::Swell { attack: 0.3, total: 1.5 },
        ];
        for env in shapes {
            assert_eq!(env.level(-0.1), 0.0, "{env:?}");
            assert_eq!(env.level(0.0), 0.0, "{env:?}");
        }
    }

    #[test]
    fn test_exponential_decay_after_attack() {
        let level = exponential_decay(0.01 + 2.0, 0.01, 2.0);
        assert!(approx_eq(level, (-1.0_f64).exp()));
    }

    #[test]
    fn test_exponential_decay_is_monotonic_after_peak() {
        let mut previous = exponential_decay(0.01, 0.01, 2.0);
        for i in 1..100 {
            let level = exponential_decay(0.01 + i as f64 * 0.03, 0.01, 2.0);
            assert!(level < previous);
            previous = level;
        }
    }

    #[test]
    fn test_percussive_drops_faster_than_plain_decay() {
        let t = 0.3;
        assert!(percussive(t, 0.003, 1.2) < exponential_decay(t, 0.003, 1.2));
        let late = percussive(5.0, 0.0, 1.0);
        assert!(approx_eq(late, (-5.0_f64).exp() * (1.0 - 0.3 * (1.0 - (-50.0_f64).exp()))));
    }

    #[test]
    fn test_soft_segments() {
        assert!(approx_eq(soft(0.025, 0.05, 0.15, 0.5), 0.5));
        assert_eq!(soft(0.1, 0.05, 0.15, 0.5), 1.0);
        assert!(approx_eq(soft(0.2 + 0.25, 0.05, 0.15, 0.5), 0.5));
        assert_eq!(soft(0.8, 0.05, 0.15, 0.5), 0.0);
        assert_eq!(soft(3.0, 0.05, 0.15, 0.5), 0.0);
    }

    #[test]
    fn test_pad_release_is_thirty_percent() {
        // total 2.0 -> release starts at 1.4
        assert_eq!(pad(1.39, 0.4, 2.0), 1.0);
        assert!(approx_eq(pad(1.7, 0.4, 2.0), 0.5));
        assert!(pad(2.0, 0.4, 2.0) < EPSILON);
        assert_eq!(pad(2.4, 0.4, 2.0), 0.0);
    }

    #[test]
    fn test_swell_release_is_fixed() {
        assert_eq!(swell(1.09, 0.3, 1.5), 1.0);
        assert!(approx_eq(swell(1.3, 0.3, 1.5), 0.5));
        assert!(swell(1.5, 0.3, 1.5) < EPSILON);
        assert_eq!(swell(1.9, 0.3, 1.5), 0.0);
    }

    #[test]
    fn test_gong_swells_above_plain_decay() {
        let attack = 0.02;
        let dt = 0.15;
        let plain = (-dt / 3.0_f64).exp();
        assert!(gong(attack + dt, attack, 3.0) > plain);
        assert_eq!(gong(attack, attack, 3.0), 1.0);
    }

    #[test]
    fn test_kalimba_blend() {
        assert!(approx_eq(kalimba(0.001, 0.001, 1.5), 1.0));
        let dt = 1.0;
        let expected = 0.7 * (-dt / 0.45_f64).exp() + 0.3 * (-dt / 1.5_f64).exp();
        assert!(approx_eq(kalimba(0.001 + dt, 0.001, 1.5), expected));
    }

    #[test]
    fn test_envelopes_stay_in_range() {
        let shapes = [
            Envelope::ExponentialDecay { attack: 0.002, decay: 1.2 },
            Envelope::Percussive { attack: 0.002, decay: 0.4 },
            Envelope::Soft { attack: 0.02, hold: 0.1, release: 0.35 },
            Envelope::Pad { attack: 0.4, total: 2.0 },
            Envelope::Kalimba { attack: 0.001, decay: 1.5 },
            Envelope::Swell { attack: 0.3, total: 1.5 },
        ];
        for env in shapes {
            for i in 0..4000 {
                let level = env.level(i as f64 / 1000.0);
                assert!((0.0..=1.0).contains(&level), "{env:?} at {i}ms: {level}");
            }
        }
        // Gong may overshoot a little but never by more than the swell depth
        for i in 0..4000 {
            let level = gong(i as f64 / 1000.0, 0.05, 2.0);
            assert!((0.0..=1.15).contains(&level));
        }
    }

    #[test]
    fn test_attack_accessor() {
        assert_eq!(Envelope::Pad { attack: 0.3, total: 1.5 }.attack(), 0.3);
        assert_eq!(Envelope::Gong { attack: 0.05, decay: 2.0 }.attack(), 0.05);
    }
}
