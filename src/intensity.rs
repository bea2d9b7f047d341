//! Intensity ramp across a frame sequence.
//!
//! Each glitched frame moves the intensity by a fixed delta. Sums are rounded
//! to four significant digits so a long run of `+0.1` steps lands on `2.0`,
//! not `1.9999999999999998`. When the value leaves its bounds it is either
//! clamped or cycled around to the other end.

use crate::GlitchError;

/// Significant digits kept after every increment.
pub const PRECISION: u32 = 4;

/// Largest `max` an [`IntensityBounds`] accepts. Shift displacement already
/// saturates at the image width well below this.
pub const INTENSITY_LIMIT: f64 = 100.0;

/// Inclusive range an intensity must stay within.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntensityBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for IntensityBounds {
    fn default() -> Self {
        Self {
            min: 0.1,
            max: 10.0,
        }
    }
}

impl IntensityBounds {
    /// Bounds must be finite with `0 < min <= max <= INTENSITY_LIMIT`.
    pub fn new(min: f64, max: f64) -> Result<Self, GlitchError> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    pub(crate) fn validate(&self) -> Result<(), GlitchError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(GlitchError::invalid("bounds", "bounds must be finite"));
        }
        if self.min <= 0.0 || self.min > self.max {
            return Err(GlitchError::invalid(
                "bounds",
                alloc::format!("need 0 < min <= max, got {}..={}", self.min, self.max),
            ));
        }
        if self.max > INTENSITY_LIMIT {
            return Err(GlitchError::invalid(
                "bounds",
                alloc::format!("max must not exceed {INTENSITY_LIMIT}, got {}", self.max),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Round `value` to `digits` significant decimal digits, ties to even.
pub fn round_significant(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() || digits == 0 {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let exponent = digits as i32 - 1 - magnitude;
    if exponent >= 0 {
        let scale = 10f64.powi(exponent);
        (value * scale).round_ties_even() / scale
    } else {
        let scale = 10f64.powi(-exponent);
        (value / scale).round_ties_even() * scale
    }
}

/// Next intensity after `current`, moved by `delta`.
///
/// Below `min`: cycles to `max + next`, or clamps to `min`.
/// Above `max`: cycles to `next mod max`, or clamps to `max`.
/// A cycled value that still falls outside the bounds is clamped rather than
/// wrapped a second time, so `advance(0.1, -0.05, true, ..)` gives `10.0`,
/// not `0.05`. The result always lies within `bounds`.
pub fn advance(current: f64, delta: f64, cycle: bool, bounds: IntensityBounds) -> f64 {
    let IntensityBounds { min, max } = bounds;
    let next = round_significant(current + delta, PRECISION);
    let next = if next < min {
        if cycle {
            round_significant(max + next, PRECISION)
        } else {
            min
        }
    } else if next > max {
        if cycle {
            round_significant(next % max, PRECISION)
        } else {
            max
        }
    } else {
        next
    };
    next.clamp(min, max)
}

/// Holds the running intensity of a sequence.
///
/// As an iterator it yields the current value and then advances, so
/// `take(n)` precomputes the intensities of `n` glitched frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityScheduler {
    current: f64,
    delta: f64,
    cycle: bool,
    bounds: IntensityBounds,
}

impl IntensityScheduler {
    pub fn new(start: f64, delta: f64, cycle: bool, bounds: IntensityBounds) -> Self {
        Self {
            current: start,
            delta,
            cycle,
            bounds,
        }
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Step to the next value and return it.
    pub fn advance(&mut self) -> f64 {
        self.current = advance(self.current, self.delta, self.cycle, self.bounds);
        self.current
    }
}

impl Iterator for IntensityScheduler {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let value = self.current;
        self.advance();
        Some(value)
    }
}
