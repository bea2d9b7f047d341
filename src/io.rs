//! Decoder and encoder seams.
//!
//! The crate never touches files or containers. An [`ImageSource`] hands over
//! decoded pixels, a [`FrameSink`] receives finished frames, and [`render`]
//! runs one job between them.
//!
//! ```rust
//! use glitchwave::io::{FrameSink, ImageSource, Output, RenderJob, Source, render};
//! use glitchwave::{AnimationSettings, Frame, GlitchOptions, SourceImage};
//! use imgref::ImgVec;
//! use rgb::Rgb;
//!
//! struct Memory(Option<SourceImage>);
//!
//! impl ImageSource for Memory {
//!     type Error = std::io::Error;
//!     fn load(&mut self) -> Result<Source, Self::Error> {
//!         self.0.take().map(Source::Still).ok_or(std::io::ErrorKind::NotFound.into())
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Collect(Vec<Frame>);
//!
//! impl FrameSink for Collect {
//!     type Error = std::io::Error;
//!     fn write_still(&mut self, frame: Frame) -> Result<(), Self::Error> {
//!         self.0.push(frame);
//!         Ok(())
//!     }
//!     fn write_animation(&mut self, frames: Vec<Frame>, _: u32, _: u16) -> Result<(), Self::Error> {
//!         self.0.extend(frames);
//!         Ok(())
//!     }
//! }
//!
//! let img = SourceImage::from(ImgVec::new(vec![Rgb::new(9u8, 9, 9); 64], 8, 8));
//! let mut sink = Collect::default();
//! let job = RenderJob::new(GlitchOptions::new(3.0).with_frames(5))
//!     .with_output(Output::Animation(AnimationSettings::default()));
//! let report = render(&mut Memory(Some(img)), &mut sink, &job).unwrap();
//! assert_eq!(report.frames, 5);
//! assert_eq!(sink.0.len(), 5);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::sequence::{AnimationFrame, glitch_animated, glitch_still};
use crate::{AnimationSettings, Frame, GlitchError, GlitchOptions, SourceImage};

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// What a decoder produced.
#[derive(Debug, Clone)]
pub enum Source {
    Still(SourceImage),
    Animated(Vec<AnimationFrame>),
}

impl Source {
    #[inline]
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Animated(_))
    }
}

/// Supplies decoded pixels. Must refuse corrupt or unsupported input itself.
pub trait ImageSource {
    type Error: core::error::Error + Send + Sync + 'static;

    fn load(&mut self) -> Result<Source, Self::Error>;
}

/// Receives finished frames in order and encodes them.
pub trait FrameSink {
    type Error: core::error::Error + Send + Sync + 'static;

    /// A single still frame.
    fn write_still(&mut self, frame: Frame) -> Result<(), Self::Error>;

    /// An animation. `duration_cs` is the per-frame delay; `loop_count` 0
    /// means loop forever.
    fn write_animation(
        &mut self,
        frames: Vec<Frame>,
        duration_cs: u32,
        loop_count: u16,
    ) -> Result<(), Self::Error>;
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// What the caller expects the source to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputKind {
    /// Take whatever the source yields.
    #[default]
    Auto,
    Still,
    Animated,
}

/// How frames are handed to the sink.
///
/// Animated sources always produce an animation; `Still` then falls back to
/// default [`AnimationSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Output {
    #[default]
    Still,
    Animation(AnimationSettings),
}

/// One source-to-sink run.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderJob {
    pub options: GlitchOptions,
    pub input: InputKind,
    pub output: Output,
}

impl RenderJob {
    pub fn new(options: GlitchOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn with_input(mut self, input: InputKind) -> Self {
        self.input = input;
        self
    }

    pub fn with_output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    fn validate(&self) -> Result<(), GlitchError> {
        self.options.validate()?;
        match self.output {
            Output::Still if self.options.frame_count != 1 => Err(GlitchError::invalid(
                "frame_count",
                alloc::format!(
                    "still output holds one frame, got {}",
                    self.options.frame_count
                ),
            )),
            Output::Animation(settings) => settings.validate(),
            Output::Still => Ok(()),
        }
    }
}

/// Summary of a finished [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderReport {
    pub frames: usize,
    /// Per-frame delay written, for animated output.
    pub duration_cs: Option<u32>,
}

/// Load from `source`, glitch per `job`, write to `sink`.
pub fn render<S, K>(
    source: &mut S,
    sink: &mut K,
    job: &RenderJob,
) -> Result<RenderReport, GlitchError>
where
    S: ImageSource,
    K: FrameSink,
{
    job.validate()?;
    let _span = tracing::debug_span!("render", input = ?job.input).entered();
    let loaded = source.load().map_err(|e| GlitchError::Source(Box::new(e)))?;

    match (job.input, &loaded) {
        (InputKind::Still, Source::Animated(_)) => {
            return Err(GlitchError::unsupported("expected a still image, got an animation"));
        }
        (InputKind::Animated, Source::Still(_)) => {
            return Err(GlitchError::unsupported("expected an animation, got a still image"));
        }
        _ => {}
    }

    match loaded {
        Source::Still(image) => {
            let mut frames = glitch_still(&image, &job.options)?;
            match job.output {
                Output::Still => {
                    let frame = frames.pop().expect("validated frame_count is 1");
                    sink.write_still(frame).map_err(|e| GlitchError::Sink(Box::new(e)))?;
                    tracing::info!("wrote glitched still");
                    Ok(RenderReport {
                        frames: 1,
                        duration_cs: None,
                    })
                }
                Output::Animation(settings) => {
                    let count = frames.len();
                    let duration_cs = settings.resolve_duration(None);
                    sink.write_animation(frames, duration_cs, settings.loop_count)
                        .map_err(|e| GlitchError::Sink(Box::new(e)))?;
                    tracing::info!(frames = count, duration_cs, "wrote glitched animation");
                    Ok(RenderReport {
                        frames: count,
                        duration_cs: Some(duration_cs),
                    })
                }
            }
        }
        Source::Animated(frames) => {
            let animation = glitch_animated(&frames, &job.options)?;
            let settings = match job.output {
                Output::Animation(settings) => settings,
                Output::Still => AnimationSettings::default(),
            };
            let duration_cs = settings.resolve_duration(Some(animation.avg_duration_cs));
            let count = animation.frame_count;
            sink.write_animation(animation.frames, duration_cs, settings.loop_count)
                .map_err(|e| GlitchError::Sink(Box::new(e)))?;
            tracing::info!(frames = count, duration_cs, "wrote glitched animation");
            Ok(RenderReport {
                frames: count,
                duration_cs: Some(duration_cs),
            })
        }
    }
}
