//! Glitch configuration.
//!
//! ```rust
//! use glitchwave::GlitchOptions;
//!
//! let options = GlitchOptions::new(2.5)
//!     .with_seed(42)
//!     .with_scanlines(true)
//!     .with_frames(23)
//!     .with_delta(0.5)
//!     .with_cycle(true);
//! options.validate().unwrap();
//! ```

use crate::intensity::{IntensityBounds, IntensityScheduler};
use crate::GlitchError;

/// Frames rendered when a still image is turned into an animation and the
/// caller does not say how many.
pub const DEFAULT_ANIMATION_FRAMES: usize = 23;

/// Everything that shapes a glitch run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GlitchOptions {
    /// Starting glitch amount. Must lie within `bounds`.
    pub intensity: f64,
    /// Makes every draw reproducible when set.
    pub seed: Option<u64>,
    /// Added to the intensity after every glitched frame.
    pub delta: f64,
    /// Wrap the intensity around its bounds instead of clamping.
    pub cycle: bool,
    /// Displace one color channel per pass.
    pub channel_offset: bool,
    /// Black out even rows per pass.
    pub scanlines: bool,
    /// Frames rendered from a still source.
    pub frame_count: usize,
    /// Glitch every `step`th frame; the rest pass through untouched.
    pub step: usize,
    pub bounds: IntensityBounds,
}

impl Default for GlitchOptions {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            seed: None,
            delta: 0.0,
            cycle: false,
            channel_offset: false,
            scanlines: false,
            frame_count: 1,
            step: 1,
            bounds: IntensityBounds::default(),
        }
    }
}

impl GlitchOptions {
    pub fn new(intensity: f64) -> Self {
        Self {
            intensity,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_cycle(mut self, cycle: bool) -> Self {
        self.cycle = cycle;
        self
    }

    pub fn with_channel_offset(mut self, enabled: bool) -> Self {
        self.channel_offset = enabled;
        self
    }

    pub fn with_scanlines(mut self, enabled: bool) -> Self {
        self.scanlines = enabled;
        self
    }

    pub fn with_frames(mut self, frame_count: usize) -> Self {
        self.frame_count = frame_count;
        self
    }

    pub fn with_step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    pub fn with_bounds(mut self, bounds: IntensityBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Check every precondition. Nothing is glitched when this fails.
    pub fn validate(&self) -> Result<(), GlitchError> {
        self.bounds.validate()?;
        let IntensityBounds { min, max } = self.bounds;
        if !self.intensity.is_finite() || !self.bounds.contains(self.intensity) {
            return Err(GlitchError::invalid(
                "intensity",
                alloc::format!("must be in {min}..={max}, got {}", self.intensity),
            ));
        }
        if !self.delta.is_finite() || self.delta < -max || self.delta > max {
            return Err(GlitchError::invalid(
                "delta",
                alloc::format!("must be in {}..={max}, got {}", -max, self.delta),
            ));
        }
        if self.step == 0 {
            return Err(GlitchError::invalid("step", "must be at least 1"));
        }
        if self.frame_count == 0 {
            return Err(GlitchError::invalid("frame_count", "must be at least 1"));
        }
        Ok(())
    }

    pub(crate) fn scheduler(&self) -> IntensityScheduler {
        IntensityScheduler::new(self.intensity, self.delta, self.cycle, self.bounds)
    }
}

/// Timing handed to the sink for animated output.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimationSettings {
    /// Delay per frame, in centiseconds.
    pub duration_cs: u32,
    /// Times to loop; 0 loops forever.
    pub loop_count: u16,
    /// For animated sources: use this multiple of the source's average frame
    /// duration instead of `duration_cs`.
    pub relative_duration: Option<f64>,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration_cs: 200,
            loop_count: 0,
            relative_duration: None,
        }
    }
}

impl AnimationSettings {
    pub fn validate(&self) -> Result<(), GlitchError> {
        if self.duration_cs == 0 {
            return Err(GlitchError::invalid("duration_cs", "must be greater than 0"));
        }
        if let Some(factor) = self.relative_duration
            && (!factor.is_finite() || factor <= 0.0)
        {
            return Err(GlitchError::invalid(
                "relative_duration",
                alloc::format!("must be a positive number, got {factor}"),
            ));
        }
        Ok(())
    }

    /// Frame delay to write, given the source's average delay if it had one.
    ///
    /// Never 0: a relative delay that rounds down to nothing becomes 1 cs.
    pub fn resolve_duration(&self, source_avg_cs: Option<u32>) -> u32 {
        match (self.relative_duration, source_avg_cs) {
            (Some(factor), Some(avg)) => ((factor * f64::from(avg)) as u32).max(1),
            _ => self.duration_cs.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(options: GlitchOptions) -> &'static str {
        match options.validate() {
            Err(GlitchError::InvalidParameter { name, .. }) => name,
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn defaults_are_valid() {
        GlitchOptions::default().validate().unwrap();
        AnimationSettings::default().validate().unwrap();
    }

    #[test]
    fn intensity_bounds_are_inclusive() {
        GlitchOptions::new(0.1).validate().unwrap();
        GlitchOptions::new(10.0).validate().unwrap();
        assert_eq!(rejected(GlitchOptions::new(0.09)), "intensity");
        assert_eq!(rejected(GlitchOptions::new(10.01)), "intensity");
        assert_eq!(rejected(GlitchOptions::new(f64::NAN)), "intensity");
    }

    #[test]
    fn delta_is_bounded_by_max() {
        GlitchOptions::new(1.0).with_delta(-10.0).validate().unwrap();
        GlitchOptions::new(1.0).with_delta(10.0).validate().unwrap();
        assert_eq!(rejected(GlitchOptions::new(1.0).with_delta(10.5)), "delta");
        assert_eq!(rejected(GlitchOptions::new(1.0).with_delta(f64::INFINITY)), "delta");
    }

    #[test]
    fn step_and_frames_must_be_positive() {
        assert_eq!(rejected(GlitchOptions::new(1.0).with_step(0)), "step");
        assert_eq!(rejected(GlitchOptions::new(1.0).with_frames(0)), "frame_count");
    }

    #[test]
    fn custom_bounds_move_the_valid_range() {
        let bounds = IntensityBounds::new(1.0, 20.0).unwrap();
        GlitchOptions::new(15.0).with_bounds(bounds).validate().unwrap();
        assert_eq!(rejected(GlitchOptions::new(0.5).with_bounds(bounds)), "intensity");
    }

    #[test]
    fn huge_bounds_are_rejected() {
        let huge = IntensityBounds {
            min: 0.1,
            max: 1e19,
        };
        assert_eq!(rejected(GlitchOptions::new(1e19).with_bounds(huge)), "bounds");
    }

    #[test]
    fn animation_settings_are_checked() {
        let zero = AnimationSettings {
            duration_cs: 0,
            ..AnimationSettings::default()
        };
        assert!(zero.validate().is_err());
        let negative = AnimationSettings {
            relative_duration: Some(-1.0),
            ..AnimationSettings::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn relative_duration_scales_source_average() {
        let settings = AnimationSettings {
            relative_duration: Some(1.5),
            ..AnimationSettings::default()
        };
        assert_eq!(settings.resolve_duration(Some(10)), 15);
        assert_eq!(settings.resolve_duration(None), 200);
        assert_eq!(AnimationSettings::default().resolve_duration(Some(10)), 200);
    }

    #[test]
    fn resolved_duration_is_never_zero() {
        let settings = AnimationSettings {
            relative_duration: Some(0.2),
            ..AnimationSettings::default()
        };
        assert_eq!(settings.resolve_duration(Some(3)), 1);
        assert_eq!(settings.resolve_duration(Some(0)), 1);
    }
}
