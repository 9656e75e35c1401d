//! The closed set of tones and the recipe behind each one.
//!
//! [`recipe_for`] is the only place a [`ToneId`] is turned into synthesis
//! data. Recipes are `static` and shared by every request.

use crate::envelopes::Envelope;
use crate::error::ToneError;
use crate::processing::SampleBuffer;
use crate::synthesis::{Modulation, Partial, PingTrain, Texture, ToneRecipe, render};
use std::fmt;
use std::str::FromStr;

/// Menu grouping of a tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToneCategory {
    Meditation,
    Modern,
    Musical,
    Nature,
    Notification,
}

/// Identifies one tone of the catalog.
///
/// Variants are listed in menu order. Names round-trip through [`FromStr`]
/// and [`Display`](fmt::Display) as kebab-case keys such as `"zen-bowl"`.
///
/// # Examples
///
/// ```
/// use carillon::ToneId;
///
/// let tone: ToneId = "wind-chimes".parse().unwrap();
/// assert_eq!(tone, ToneId::WindChimes);
/// assert_eq!(tone.to_string(), "wind-chimes");
/// assert!("doorbell".parse::<ToneId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToneId {
    /// Slot for a user recording. Recording is handled elsewhere, so this
    /// plays the mindful bell.
    #[default]
    CustomRecording,
    ZenBowl,
    CrystalChime,
    TibetanBowl,
    TempleGong,
    MindfulBell,
    SoftPulse,
    AmbientWave,
    DigitalChime,
    Aurora,
    Marimba,
    Vibraphone,
    Kalimba,
    WindChimes,
    WaterDroplet,
    BambooKnock,
    RainStick,
    GentleAlert,
    SuccessTone,
    SoftGong,
}

impl ToneId {
    /// Every tone, in menu order.
    pub const ALL: [ToneId; 20] = [
        ToneId::CustomRecording,
        ToneId::ZenBowl,
        ToneId::CrystalChime,
        ToneId::TibetanBowl,
        ToneId::TempleGong,
        ToneId::MindfulBell,
        ToneId::SoftPulse,
        ToneId::AmbientWave,
        ToneId::DigitalChime,
        ToneId::Aurora,
        ToneId::Marimba,
        ToneId::Vibraphone,
        ToneId::Kalimba,
        ToneId::WindChimes,
        ToneId::WaterDroplet,
        ToneId::BambooKnock,
        ToneId::RainStick,
        ToneId::GentleAlert,
        ToneId::SuccessTone,
        ToneId::SoftGong,
    ];

    /// Stable kebab-case key.
    pub const fn name(self) -> &'static str {
        match self {
            ToneId::CustomRecording => "custom-recording",
            ToneId::ZenBowl => "zen-bowl",
            ToneId::CrystalChime => "crystal-chime",
            ToneId::TibetanBowl => "tibetan-bowl",
            ToneId::TempleGong => "temple-gong",
            ToneId::MindfulBell => "mindful-bell",
            ToneId::SoftPulse => "soft-pulse",
            ToneId::AmbientWave => "ambient-wave",
            ToneId::DigitalChime => "digital-chime",
            ToneId::Aurora => "aurora",
            ToneId::Marimba => "marimba",
            ToneId::Vibraphone => "vibraphone",
            ToneId::Kalimba => "kalimba",
            ToneId::WindChimes => "wind-chimes",
            ToneId::WaterDroplet => "water-droplet",
            ToneId::BambooKnock => "bamboo-knock",
            ToneId::RainStick => "rain-stick",
            ToneId::GentleAlert => "gentle-alert",
            ToneId::SuccessTone => "success-tone",
            ToneId::SoftGong => "soft-gong",
        }
    }

    /// Human readable name for menus.
    pub const fn display_name(self) -> &'static str {
        match self {
            ToneId::CustomRecording => "Custom Recording",
            ToneId::ZenBowl => "Zen Bowl",
            ToneId::CrystalChime => "Crystal Chime",
            ToneId::TibetanBowl => "Tibetan Bowl",
            ToneId::TempleGong => "Temple Gong",
            ToneId::MindfulBell => "Mindful Bell",
            ToneId::SoftPulse => "Soft Pulse",
            ToneId::AmbientWave => "Ambient Wave",
            ToneId::DigitalChime => "Digital Chime",
            ToneId::Aurora => "Aurora",
            ToneId::Marimba => "Marimba",
            ToneId::Vibraphone => "Vibraphone",
            ToneId::Kalimba => "Kalimba",
            ToneId::WindChimes => "Wind Chimes",
            ToneId::WaterDroplet => "Water Droplet",
            ToneId::BambooKnock => "Bamboo Knock",
            ToneId::RainStick => "Rain Stick",
            ToneId::GentleAlert => "Gentle Alert",
            ToneId::SuccessTone => "Success",
            ToneId::SoftGong => "Soft Gong",
        }
    }

    /// Icon shown next to the name in a picker.
    pub const fn emoji(self) -> &'static str {
        match self {
            ToneId::CustomRecording => "🎙️",
            ToneId::ZenBowl => "🧘",
            ToneId::CrystalChime => "💎",
            ToneId::TibetanBowl => "🔔",
            ToneId::TempleGong => "🛕",
            ToneId::MindfulBell => "🪷",
            ToneId::SoftPulse => "💫",
            ToneId::AmbientWave => "🌊",
            ToneId::DigitalChime => "✨",
            ToneId::Aurora => "🌌",
            ToneId::Marimba => "🎵",
            ToneId::Vibraphone => "🎶",
            ToneId::Kalimba => "🎹",
            ToneId::WindChimes => "🎐",
            ToneId::WaterDroplet => "💧",
            ToneId::BambooKnock => "🎋",
            ToneId::RainStick => "🌧️",
            ToneId::GentleAlert => "🔉",
            ToneId::SuccessTone => "✅",
            ToneId::SoftGong => "🥁",
        }
    }

    /// Menu group the tone is listed under.
    pub const fn category(self) -> ToneCategory {
        match self {
            ToneId::CustomRecording
            | ToneId::ZenBowl
            | ToneId::CrystalChime
            | ToneId::TibetanBowl
            | ToneId::TempleGong
            | ToneId::MindfulBell => ToneCategory::Meditation,
            ToneId::SoftPulse | ToneId::AmbientWave | ToneId::DigitalChime | ToneId::Aurora => {
                ToneCategory::Modern
            }
            ToneId::Marimba | ToneId::Vibraphone | ToneId::Kalimba | ToneId::WindChimes => {
                ToneCategory::Musical
            }
            ToneId::WaterDroplet | ToneId::BambooKnock | ToneId::RainStick => ToneCategory::Nature,
            ToneId::GentleAlert | ToneId::SuccessTone | ToneId::SoftGong => {
                ToneCategory::Notification
            }
        }
    }

    /// True for the user recording slot, which has no recipe of its own.
    pub const fn is_custom_recording(self) -> bool {
        matches!(self, ToneId::CustomRecording)
    }

    /// The recipe this tone renders with. See [`recipe_for`].
    pub fn recipe(self) -> &'static ToneRecipe<'static> {
        recipe_for(self)
    }
}

impl fmt::Display for ToneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToneId {
    type Err = ToneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToneId::ALL
            .into_iter()
            .find(|tone| tone.name() == s)
            .ok_or_else(|| ToneError::UnknownTone(s.to_owned()))
    }
}

/// Looks up the recipe for a tone.
///
/// [`ToneId::CustomRecording`] is the one designated default and maps to the
/// mindful bell recipe; every other tone has its own.
pub fn recipe_for(tone: ToneId) -> &'static ToneRecipe<'static> {
    match tone {
        ToneId::CustomRecording | ToneId::MindfulBell => &MINDFUL_BELL,
        ToneId::ZenBowl => &ZEN_BOWL,
        ToneId::CrystalChime => &CRYSTAL_CHIME,
        ToneId::TibetanBowl => &TIBETAN_BOWL,
        ToneId::TempleGong => &TEMPLE_GONG,
        ToneId::SoftPulse => &SOFT_PULSE,
        ToneId::AmbientWave => &AMBIENT_WAVE,
        ToneId::DigitalChime => &DIGITAL_CHIME,
        ToneId::Aurora => &AURORA,
        ToneId::Marimba => &MARIMBA,
        ToneId::Vibraphone => &VIBRAPHONE,
        ToneId::Kalimba => &KALIMBA,
        ToneId::WindChimes => &WIND_CHIMES,
        ToneId::WaterDroplet => &WATER_DROPLET,
        ToneId::BambooKnock => &BAMBOO_KNOCK,
        ToneId::RainStick => &RAIN_STICK,
        ToneId::GentleAlert => &GENTLE_ALERT,
        ToneId::SuccessTone => &SUCCESS_TONE,
        ToneId::SoftGong => &SOFT_GONG,
    }
}

/// Renders a tone into a fresh buffer. Deterministic: the same tone always
/// yields the same samples.
///
/// # Examples
///
/// ```
/// use carillon::{ToneId, generate};
///
/// let buffer = generate(ToneId::MindfulBell);
/// assert_eq!(buffer.len(), 132_300);
/// assert_eq!(buffer.samples()[0], 0);
/// ```
pub fn generate(tone: ToneId) -> SampleBuffer {
    render(recipe_for(tone))
}

const fn exp_decay(attack: f64, decay: f64) -> Envelope {
    Envelope::ExponentialDecay { attack, decay }
}

const fn soft(attack: f64, hold: f64, release: f64) -> Envelope {
    Envelope::Soft {
        attack,
        hold,
        release,
    }
}

// Meditation

static ZEN_BOWL: ToneRecipe<'static> = ToneRecipe::new(220.0, 2.5, exp_decay(0.01, 2.0), 0.5)
    .with_partials(&[
        Partial::new(1.0, 1.0),
        Partial::new(2.0, 0.5),
        Partial::new(3.0, 0.25),
        Partial::new(4.76, 0.15),
        Partial::new(6.28, 0.08),
    ])
    .with_drift(0.002, 0.5)
    .with_modulation(Modulation::tremolo(0.03, 5.5));

// Harmonic h follows envelope^(1 + 0.3h)
static CRYSTAL_CHIME: ToneRecipe<'static> =
    ToneRecipe::new(1047.0, 1.8, exp_decay(0.002, 1.2), 0.45).with_partials(&[
        Partial::new(1.0, 1.0),
        Partial::new(2.0, 0.6).with_envelope_exponent(1.3),
        Partial::new(3.0, 0.4).with_envelope_exponent(1.6),
        Partial::new(4.0, 0.25).with_envelope_exponent(1.9),
        Partial::new(5.0, 0.12).with_envelope_exponent(2.2),
    ]);

static TIBETAN_BOWL: ToneRecipe<'static> =
    ToneRecipe::new(174.61, 3.0, exp_decay(0.015, 2.5), 0.4).with_partials(&[
        Partial::new(1.0, 1.0)
            .with_envelope(exp_decay(0.015, 2.5))
            .with_beat(Modulation::tremolo(0.02, 0.5)),
        Partial::new(2.71, 0.7)
            .with_envelope(exp_decay(0.015, 2.0))
            .with_beat(Modulation::tremolo(0.02, 0.8)),
        Partial::new(5.19, 0.35)
            .with_envelope(exp_decay(0.015, 1.5))
            .with_beat(Modulation::tremolo(0.02, 1.1)),
        Partial::new(8.44, 0.18)
            .with_envelope(exp_decay(0.015, 1.2))
            .with_beat(Modulation::tremolo(0.02, 1.4)),
        Partial::new(12.5, 0.08)
            .with_envelope(exp_decay(0.015, 0.9))
            .with_beat(Modulation::tremolo(0.02, 1.7)),
    ]);

static TEMPLE_GONG: ToneRecipe<'static> = ToneRecipe::new(
    98.0,
    3.5,
    Envelope::Gong {
        attack: 0.02,
        decay: 3.0,
    },
    0.35,
)
.with_partials(&[
    Partial::new(1.0, 1.0),
    Partial::new(2.4, 0.5),
    Partial::new(3.8, 0.3),
    Partial::new(5.3, 0.2),
    Partial::new(7.1, 0.1),
])
.with_modulation(Modulation::tremolo(0.01, 2.5));

static MINDFUL_BELL: ToneRecipe<'static> = ToneRecipe::new(528.0, 3.0, exp_decay(0.01, 2.5), 0.5)
    .with_partials(&[
        Partial::new(1.0, 1.0),
        Partial::new(2.0, 0.35),
        Partial::new(3.0, 0.15),
        Partial::new(4.0, 0.08),
        Partial::new(1.003, 0.1),
    ]);

// Modern

static SOFT_PULSE: ToneRecipe<'static> = ToneRecipe::new(440.0, 0.8, soft(0.05, 0.15, 0.5), 0.5)
    .with_partials(&[
        Partial::new(1.0, 1.0),
        Partial::new(2.0, 0.3),
        Partial::new(3.0, 0.1),
    ]);

/// C4 with its fifth G4, both doubled an octave up, plus a slightly sharp chorus.
static AMBIENT_WAVE: ToneRecipe<'static> = ToneRecipe::new(
    261.63,
    2.0,
    Envelope::Pad {
        attack: 0.3,
        total: 1.5,
    },
    0.35,
)
.with_partials(&[
    Partial::new(1.0, 1.0),
    Partial::new(392.0 / 261.63, 0.7),
    Partial::new(2.0, 0.4),
    Partial::new(2.0 * 392.0 / 261.63, 0.2),
    Partial::new(1.003, 0.1),
]);

/// C major arpeggio, 30 ms between notes.
static DIGITAL_CHIME: ToneRecipe<'static> =
    ToneRecipe::new(523.25, 1.2, exp_decay(0.005, 0.8), 0.4).with_partials(&[
        Partial::new(1.0, 1.0),
        Partial::new(2.0, 0.3),
        Partial::new(659.25 / 523.25, 1.0).delayed(0.03),
        Partial::new(2.0 * 659.25 / 523.25, 0.3).delayed(0.03),
        Partial::new(783.99 / 523.25, 1.0).delayed(0.06),
        Partial::new(2.0 * 783.99 / 523.25, 0.3).delayed(0.06),
    ]);

static AURORA: ToneRecipe<'static> = ToneRecipe::new(
    349.23,
    2.5,
    Envelope::Pad {
        attack: 0.4,
        total: 2.0,
    },
    0.3,
)
.with_partials(&[
    Partial::new(1.0, 1.0),
    Partial::new(1.002, 0.8),
    Partial::new(0.998, 0.6),
    Partial::new(2.001, 0.5),
    Partial::new(3.0, 0.3),
])
.with_modulation(Modulation::new(0.85, 0.15, 0.3));

// Musical

/// Weak fundamental, strong but short-lived fourth harmonic.
static MARIMBA: ToneRecipe<'static> = ToneRecipe::new(
    392.0,
    1.5,
    Envelope::Percussive {
        attack: 0.003,
        decay: 1.2,
    },
    0.45,
)
.with_partials(&[
    Partial::new(1.0, 0.7),
    Partial::new(2.0, 0.3),
    Partial::new(3.0, 0.15),
    Partial::new(4.0, 1.0).damped(5.0),
]);

static VIBRAPHONE: ToneRecipe<'static> =
    ToneRecipe::new(523.25, 2.5, exp_decay(0.008, 2.0), 0.45)
        .with_partials(&[
            Partial::new(1.0, 1.0),
            Partial::new(2.0, 0.4),
            Partial::new(4.0, 0.2),
            Partial::new(5.0, 0.1),
        ])
        .with_modulation(Modulation::tremolo(0.15, 5.5));

static KALIMBA: ToneRecipe<'static> = ToneRecipe::new(
    587.33,
    2.0,
    Envelope::Kalimba {
        attack: 0.001,
        decay: 1.5,
    },
    0.5,
)
.with_partials(&[
    Partial::new(1.0, 1.0),
    Partial::new(2.0, 0.5).damped(3.0),
    Partial::new(3.0, 0.3).damped(5.0),
    Partial::new(5.0, 0.2).damped(8.0),
]);

/// Five chimes struck in turn; later chimes ring longer.
static WIND_CHIMES: ToneRecipe<'static> =
    ToneRecipe::new(880.0, 2.2, exp_decay(0.002, 1.0), 0.35).with_partials(&[
        Partial::new(1.0, 0.6),
        Partial::new(2.0, 0.3),
        Partial::new(1108.73 / 880.0, 0.6)
            .delayed(0.08)
            .with_envelope(exp_decay(0.002, 1.2)),
        Partial::new(2.0 * 1108.73 / 880.0, 0.3)
            .delayed(0.08)
            .with_envelope(exp_decay(0.002, 1.2)),
        Partial::new(1318.51 / 880.0, 0.6)
            .delayed(0.15)
            .with_envelope(exp_decay(0.002, 1.4)),
        Partial::new(2.0 * 1318.51 / 880.0, 0.3)
            .delayed(0.15)
            .with_envelope(exp_decay(0.002, 1.4)),
        Partial::new(1567.98 / 880.0, 0.6)
            .delayed(0.22)
            .with_envelope(exp_decay(0.002, 1.6)),
        Partial::new(2.0 * 1567.98 / 880.0, 0.3)
            .delayed(0.22)
            .with_envelope(exp_decay(0.002, 1.6)),
        Partial::new(2.0, 0.6)
            .delayed(0.35)
            .with_envelope(exp_decay(0.002, 1.8)),
        Partial::new(4.0, 0.3)
            .delayed(0.35)
            .with_envelope(exp_decay(0.002, 1.8)),
    ]);

// Nature

/// Falls from 2 kHz to 600 Hz over the first 150 ms.
static WATER_DROPLET: ToneRecipe<'static> = ToneRecipe::new(
    2000.0,
    0.8,
    Envelope::Percussive {
        attack: 0.001,
        decay: 0.5,
    },
    0.5,
)
.with_partials(&[Partial::new(1.0, 1.0), Partial::new(2.0, 0.3)])
.with_sweep(600.0, 0.15);

static BAMBOO_KNOCK: ToneRecipe<'static> = ToneRecipe::new(
    280.0,
    0.6,
    Envelope::Percussive {
        attack: 0.002,
        decay: 0.4,
    },
    0.55,
)
.with_partials(&[
    Partial::new(1.0, 1.0),
    Partial::new(2.76, 0.6).damped(8.0),
    Partial::new(5.4, 0.3).damped(15.0),
])
.with_click(0.5, 0.01);

/// Rustling noise with fifteen rising pings. No tonal partials.
static RAIN_STICK: ToneRecipe<'static> = ToneRecipe::new(
    1500.0,
    2.0,
    Envelope::Swell {
        attack: 0.3,
        total: 1.5,
    },
    0.5,
)
.with_texture(Texture {
    seed: 42,
    noise_level: 0.15,
    pings: Some(PingTrain {
        count: 15,
        first_onset: 0.05,
        spacing: 0.12,
        frequency: 1500.0,
        frequency_step: 200.0,
        decay_rate: 12.0,
        lifetime: 0.3,
        level: 0.2,
    }),
})
.smoothed();

// Notification

/// F5 then A5, overlapping by 150 ms.
static GENTLE_ALERT: ToneRecipe<'static> =
    ToneRecipe::new(698.46, 0.6, soft(0.02, 0.1, 0.35), 0.45).with_partials(&[
        Partial::new(1.0, 1.0)
            .with_envelope(soft(0.02, 0.1, 0.25))
            .until(0.3),
        Partial::new(2.0, 0.3)
            .with_envelope(soft(0.02, 0.1, 0.25))
            .until(0.3),
        Partial::new(880.0 / 698.46, 1.0).delayed(0.15),
        Partial::new(2.0 * 880.0 / 698.46, 0.3).delayed(0.15),
    ]);

/// Ascending major third, C5 then E5.
static SUCCESS_TONE: ToneRecipe<'static> =
    ToneRecipe::new(523.25, 0.8, soft(0.02, 0.15, 0.5), 0.45).with_partials(&[
        Partial::new(1.0, 1.0)
            .with_envelope(soft(0.02, 0.15, 0.35))
            .until(0.4),
        Partial::new(2.0, 0.4)
            .with_envelope(soft(0.02, 0.15, 0.35))
            .until(0.4),
        Partial::new(659.25 / 523.25, 1.0).delayed(0.12),
        Partial::new(2.0 * 659.25 / 523.25, 0.4).delayed(0.12),
    ]);

static SOFT_GONG: ToneRecipe<'static> = ToneRecipe::new(
    130.81,
    2.5,
    Envelope::Gong {
        attack: 0.05,
        decay: 2.0,
    },
    0.4,
)
.with_partials(&[
    Partial::new(1.0, 1.0),
    Partial::new(2.0, 0.4),
    Partial::new(3.2, 0.2),
    Partial::new(4.5, 0.1),
])
.with_modulation(Modulation::tremolo(0.02, 3.0));

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_round_trip() {
        for tone in ToneId::ALL {
            assert_eq!(tone.name().parse::<ToneId>().unwrap(), tone);
            assert_eq!(tone.to_string(), tone.name());
        }
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = ToneId::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), ToneId::ALL.len());
    }

    #[test]
    fn test_unknown_name() {
        let err = "ZenBowl".parse::<ToneId>().unwrap_err();
        assert!(matches!(err, ToneError::UnknownTone(name) if name == "ZenBowl"));
        assert!("".parse::<ToneId>().is_err());
    }

    #[test]
    fn test_custom_recording_is_default_mapping() {
        assert_eq!(ToneId::default(), ToneId::CustomRecording);
        assert!(ToneId::CustomRecording.is_custom_recording());
        assert!(!ToneId::MindfulBell.is_custom_recording());
        assert!(std::ptr::eq(
            recipe_for(ToneId::CustomRecording),
            recipe_for(ToneId::MindfulBell)
        ));
    }

    #[test]
    fn test_other_tones_have_distinct_recipes() {
        let recipes: HashSet<_> = ToneId::ALL
            .iter()
            .filter(|t| !t.is_custom_recording())
            .map(|&t| recipe_for(t) as *const ToneRecipe<'static>)
            .collect();
        assert_eq!(recipes.len(), ToneId::ALL.len() - 1);
    }

    #[test]
    fn test_every_recipe_validates() {
        for tone in ToneId::ALL {
            assert_eq!(tone.recipe().validate(), Ok(()), "{tone}");
        }
    }

    #[test]
    fn test_categories() {
        assert_eq!(ToneId::TempleGong.category(), ToneCategory::Meditation);
        assert_eq!(ToneId::Aurora.category(), ToneCategory::Modern);
        assert_eq!(ToneId::WindChimes.category(), ToneCategory::Musical);
        assert_eq!(ToneId::RainStick.category(), ToneCategory::Nature);
        assert_eq!(ToneId::SoftGong.category(), ToneCategory::Notification);
    }

    #[test]
    fn test_only_rain_stick_is_smoothed() {
        for tone in ToneId::ALL {
            assert_eq!(tone.recipe().smoothing, tone == ToneId::RainStick, "{tone}");
        }
    }

    #[test]
    fn test_short_tone_lengths() {
        assert_eq!(generate(ToneId::SoftPulse).len(), 35_280);
        assert_eq!(generate(ToneId::BambooKnock).len(), 26_460);
        assert_eq!(generate(ToneId::GentleAlert).len(), 26_460);
    }
}
