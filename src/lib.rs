//! # glitchwave
//!
//! *Break your pixels on purpose.*
//!
//! Deterministic, seedable glitch-art transforms for 8-bit RGB and RGBA
//! images. A pass shifts random horizontal bands sideways with wrap-around,
//! optionally slides one color channel across the frame, and optionally
//! blacks out every other row. Stills can be rendered into animations with a
//! ramping or cycling intensity; animations get every `step`th frame glitched.
//!
//! ## Layers
//!
//! - [`PixelBuffer`] holds an unmodified input grid and the output grid a pass
//!   writes into, with bounds-checked region and channel copies.
//! - [`shift`], [`channel`] and [`scanline`] are the three transforms.
//! - [`FrameSequencer`], [`glitch_still`] and [`glitch_animated`] drive passes
//!   over frames, with the intensity schedule in [`intensity`].
//! - [`io`] defines the decoder and encoder seams; no file formats live here.
//!
//! ```rust
//! use glitchwave::{GlitchOptions, SourceImage, glitch_still};
//! use imgref::ImgVec;
//! use rgb::Rgb;
//!
//! let pixels = (0..64u8).map(|i| Rgb::new(i, i * 2, i * 3)).collect();
//! let src = SourceImage::from(ImgVec::new(pixels, 8, 8));
//! let options = GlitchOptions::new(4.0).with_seed(7).with_scanlines(true);
//!
//! let a = glitch_still(&src, &options).unwrap();
//! let b = glitch_still(&src, &options).unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a[0].samples()[..3], [0, 0, 0]);
//! ```
//!
//! ## Feature flags
//!
//! - **`serde`**: `Serialize`/`Deserialize` for the option and settings types.
//!
//! ## Logging
//!
//! Passes and frames emit [`tracing`] events at `trace` and `debug`; finished
//! renders log at `info`. Install a subscriber to see them.

#![forbid(unsafe_code)]

extern crate alloc;

mod buffer;
mod error;
mod layout;
mod options;
mod sequence;

pub mod channel;
pub mod intensity;
pub mod io;
pub mod rng;
pub mod scanline;
pub mod shift;

pub use buffer::{PixelBuffer, Region};
pub use error::{GlitchError, RangeError};
pub use intensity::{IntensityBounds, IntensityScheduler};
pub use layout::{Frame, IndexedImage, Layout, SourceImage};
pub use options::{AnimationSettings, DEFAULT_ANIMATION_FRAMES, GlitchOptions};
pub use rng::GlitchRng;
pub use sequence::{
    Animation, AnimationFrame, FrameSequencer, PassPlan, glitch_animated, glitch_still,
};
