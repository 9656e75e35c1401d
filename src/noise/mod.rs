//! Seeded noise sources for textured tones.

mod white;

pub use white::{WhiteNoise, create_rng};
