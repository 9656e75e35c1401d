//! Ramp curves used for envelope attack and release segments.

/// Interpolation curve for a rising or falling envelope segment.
///
/// Both curves map a normalized input in [0, 1] to an output in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ramp {
    /// Constant rate of change
    #[default]
    Linear,

    /// Cubic ease in and out (smoothstep)
    Smooth,
}

impl Ramp {
    /// Maps progress `u` through the segment to a level. `u` is clamped to
    /// [0, 1] first.
    ///
    /// # Examples
    ///
    /// ```
    /// use carillon::envelopes::Ramp;
    ///
    /// assert_eq!(Ramp::Linear.apply(0.25), 0.25);
    /// assert_eq!(Ramp::Smooth.apply(0.5), 0.5);
    /// assert!(Ramp::Smooth.apply(0.25) < 0.25);
    /// ```
    pub fn apply(&self, u: f64) -> f64 {
        let u = u.clamp(0.0, 1.0);
        match self {
            Ramp::Linear => u,
            Ramp::Smooth => u * u * (3.0 - 2.0 * u),
        }
    }

    /// Level of a segment rising from 0 to 1 over `length` seconds.
    ///
    /// A zero-length segment is already complete.
    pub fn rise(&self, elapsed: f64, length: f64) -> f64 {
        if length <= 0.0 {
            return 1.0;
        }
        self.apply(elapsed / length)
    }

    /// Level of a segment falling from 1 to 0 over `length` seconds.
    pub fn fall(&self, elapsed: f64, length: f64) -> f64 {
        1.0 - self.rise(elapsed, length)
    }
}

/// Standard cubic Hermite smoothstep.
///
/// Clamps `x` to `[edge0, edge1]`, normalizes it to `u` in [0, 1] and returns
/// `u²(3 - 2u)`. Degenerate edges act as a step at `edge0`.
///
/// # Examples
///
/// ```
/// use carillon::envelopes::smoothstep;
///
/// assert_eq!(smoothstep(0.0, 2.0, -1.0), 0.0);
/// assert_eq!(smoothstep(0.0, 2.0, 1.0), 0.5);
/// assert_eq!(smoothstep(0.0, 2.0, 5.0), 1.0);
/// ```
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    Ramp::Smooth.apply((x - edge0) / (edge1 - edge0))
}
