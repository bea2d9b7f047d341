//! Glitch passes and frame sequencing.
//!
//! A pass is planned first (every random draw, in a fixed order) and then
//! applied to a fresh [`PixelBuffer`]:
//!
//! 1. `2 × floor(I)` band shifts. With a seed, draw `k` comes from the
//!    generator re-keyed to `seed + k`.
//! 2. If enabled, one channel offset, drawn after re-keying to `seed`.
//! 3. If enabled, scan lines.
//!
//! Frames whose index is not a multiple of `step` are copies of the source.
//! Intensity advances once per glitched frame.

use alloc::vec::Vec;

use crate::channel::{ChannelOffset, draw_offset, offset_channel};
use crate::intensity::IntensityScheduler;
use crate::layout::{Frame, SourceImage};
use crate::rng::GlitchRng;
use crate::scanline::apply_scanlines;
use crate::shift::{BandShift, draw_shift, iterations, shift_band};
use crate::{GlitchError, GlitchOptions, PixelBuffer};

// ---------------------------------------------------------------------------
// Pass planning
// ---------------------------------------------------------------------------

/// Every random decision of one glitch pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassPlan {
    /// Drawn shifts in draw order, zero displacements included.
    pub shifts: Vec<BandShift>,
    pub channel_offset: Option<ChannelOffset>,
    pub scanlines: bool,
}

impl PassPlan {
    /// Draw a plan for a `width × height × channels` image at `intensity`.
    pub fn draw(
        rng: &mut GlitchRng,
        width: usize,
        height: usize,
        channels: usize,
        intensity: f64,
        options: &GlitchOptions,
    ) -> Self {
        let shifts = (0..iterations(intensity))
            .map(|k| {
                rng.reseed(k as u64);
                draw_shift(rng, width, height, intensity)
            })
            .collect();
        let channel_offset = options.channel_offset.then(|| {
            rng.reseed(0);
            draw_offset(rng, width, height, channels, intensity)
        });
        Self {
            shifts,
            channel_offset,
            scanlines: options.scanlines,
        }
    }

    /// Apply the plan to `buffer`.
    pub fn apply(&self, buffer: &mut PixelBuffer) -> Result<(), GlitchError> {
        for shift in &self.shifts {
            if shift.displacement == 0 {
                tracing::trace!(start_y = shift.band.start_y, "zero displacement, band skipped");
                continue;
            }
            tracing::trace!(
                start_y = shift.band.start_y,
                height = shift.band.height,
                displacement = shift.displacement,
                "band shift"
            );
            shift_band(buffer, shift.band, shift.displacement)?;
        }
        if let Some(offset) = self.channel_offset {
            tracing::trace!(
                offset_x = offset.offset_x,
                offset_y = offset.offset_y,
                channel = offset.channel,
                "channel offset"
            );
            offset_channel(buffer, offset)?;
        }
        if self.scanlines {
            apply_scanlines(buffer);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FrameSequencer
// ---------------------------------------------------------------------------

/// Drives glitch passes over a run of frames.
///
/// Holds the draw source and the running intensity; nothing else carries
/// over from one frame to the next.
#[derive(Debug)]
pub struct FrameSequencer {
    options: GlitchOptions,
    rng: GlitchRng,
    scheduler: IntensityScheduler,
}

impl FrameSequencer {
    /// Validates `options` before anything is drawn.
    pub fn new(options: &GlitchOptions) -> Result<Self, GlitchError> {
        options.validate()?;
        Ok(Self {
            options: options.clone(),
            rng: GlitchRng::new(options.seed),
            scheduler: options.scheduler(),
        })
    }

    /// Intensity the next glitched frame will use.
    #[inline]
    pub fn intensity(&self) -> f64 {
        self.scheduler.current()
    }

    /// Glitch `source` at the current intensity, then advance the intensity.
    pub fn glitch(&mut self, source: &Frame) -> Frame {
        let intensity = self.scheduler.current();
        let mut buffer = source.to_buffer();
        let plan = PassPlan::draw(
            &mut self.rng,
            buffer.width(),
            buffer.height(),
            buffer.channels(),
            intensity,
            &self.options,
        );
        plan.apply(&mut buffer)
            .expect("drawn plan always fits the buffer it was drawn for");
        self.scheduler.advance();
        Frame::from_buffer(buffer, source.layout())
    }

    /// Frame `index` of the output: glitched on every `step`th index,
    /// otherwise a copy of `source`.
    pub fn frame(&mut self, index: usize, source: &Frame) -> Frame {
        if index % self.options.step != 0 {
            tracing::debug!(frame = index, "pass-through frame");
            return source.clone();
        }
        tracing::debug!(frame = index, intensity = self.intensity(), "glitching frame");
        self.glitch(source)
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// One frame of an animated source.
#[derive(Debug, Clone)]
pub struct AnimationFrame {
    pub image: SourceImage,
    /// Display time in centiseconds.
    pub duration_cs: u32,
}

/// Output of [`glitch_animated`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    pub frames: Vec<Frame>,
    /// Mean source frame duration in centiseconds, rounded down.
    pub avg_duration_cs: u32,
    pub frame_count: usize,
}

/// Glitch a still image into `options.frame_count` frames.
pub fn glitch_still(image: &SourceImage, options: &GlitchOptions) -> Result<Vec<Frame>, GlitchError> {
    let mut sequencer = FrameSequencer::new(options)?;
    let pristine = image.to_frame()?;
    let _span = tracing::debug_span!(
        "glitch_still",
        width = pristine.width(),
        height = pristine.height(),
        frames = options.frame_count
    )
    .entered();
    Ok((0..options.frame_count)
        .map(|i| sequencer.frame(i, &pristine))
        .collect())
}

/// Glitch every `options.step`th frame of an animation.
///
/// `options.frame_count` is ignored; the source decides how many frames
/// there are.
pub fn glitch_animated(
    frames: &[AnimationFrame],
    options: &GlitchOptions,
) -> Result<Animation, GlitchError> {
    let mut sequencer = FrameSequencer::new(options)?;
    if frames.is_empty() {
        return Err(GlitchError::unsupported("animation has no frames"));
    }
    let pristine = frames
        .iter()
        .map(|f| f.image.to_frame())
        .collect::<Result<Vec<_>, _>>()?;
    let total: u64 = frames.iter().map(|f| u64::from(f.duration_cs)).sum();
    let avg_duration_cs = (total / frames.len() as u64) as u32;
    let _span = tracing::debug_span!(
        "glitch_animated",
        frames = frames.len(),
        avg_duration_cs
    )
    .entered();
    let glitched = pristine
        .iter()
        .enumerate()
        .map(|(i, frame)| sequencer.frame(i, frame))
        .collect();
    Ok(Animation {
        frames: glitched,
        avg_duration_cs,
        frame_count: frames.len(),
    })
}
