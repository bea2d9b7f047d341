//! Error types.
//!
//! [`GlitchError`] is what callers see. [`RangeError`] is the narrower
//! failure of the [`PixelBuffer`](crate::PixelBuffer) region API; the engine
//! itself never produces one when its arithmetic is right.

use alloc::boxed::Box;
use alloc::string::String;

/// A region copy or assignment did not fit its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RangeError {
    /// The row or column range extends past the buffer edge, or is reversed.
    #[error("range {start}..{end} is outside 0..{limit}")]
    OutOfBounds {
        start: usize,
        end: usize,
        limit: usize,
    },
    /// The data being assigned does not have the destination's shape.
    ///
    /// Shapes are `(samples per row, rows)`.
    #[error("region shaped {actual:?} cannot fill a destination shaped {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// Channel index is not below the buffer's channel count.
    #[error("channel {channel} does not exist in a {channels}-channel buffer")]
    NoSuchChannel { channel: usize, channels: usize },
    /// Width, height or channel count is zero.
    #[error("buffer dimensions must be non-zero, got {width}x{height}x{channels}")]
    Empty {
        width: usize,
        height: usize,
        channels: usize,
    },
    /// Sample count does not equal `width * height * channels`.
    #[error("expected {expected} samples, got {actual}")]
    SampleCount { expected: usize, actual: usize },
}

/// Errors surfaced by the glitch entry points.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GlitchError {
    /// An option is out of range or not finite. Nothing was touched.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The source cannot be glitched as requested.
    #[error("unsupported source: {0}")]
    UnsupportedSource(String),

    /// Region arithmetic failed on a caller-constructed buffer.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// The image source collaborator failed.
    #[error("image source failed")]
    Source(#[source] Box<dyn core::error::Error + Send + Sync + 'static>),

    /// The frame sink collaborator failed.
    #[error("frame sink failed")]
    Sink(#[source] Box<dyn core::error::Error + Send + Sync + 'static>),
}

impl GlitchError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedSource(reason.into())
    }
}
