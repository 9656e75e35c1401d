//! Envelope shapes and ramp curves.
//!
//! Every envelope here is a pure function of elapsed time: no note-on state,
//! no per-sample bookkeeping. A tone voice can evaluate the same envelope at
//! any instant, in any order, and always get the same multiplier back.

mod curve;
mod shapes;

pub use curve::{Ramp, smoothstep};
pub use shapes::{
    Envelope, exponential_decay, gong, kalimba, pad, percussive, soft, swell,
};
