//! Source pixel layouts and glitched frames.
//!
//! Sources arrive in one of three layouts: palette-indexed (as GIF frames
//! decode), RGB, or RGBA. Each is resolved once to a canonical interleaved
//! 8-bit layout before any glitching happens:
//!
//! | Source                          | Canonical |
//! |---------------------------------|-----------|
//! | `Indexed` without transparency  | `Rgb`     |
//! | `Indexed` with a transparent index | `Rgba` |
//! | `Rgb`                           | `Rgb`     |
//! | `Rgba`                          | `Rgba`    |
//!
//! ```rust
//! use glitchwave::{Layout, SourceImage};
//! use imgref::ImgVec;
//! use rgb::Rgb;
//!
//! let src = SourceImage::from(ImgVec::new(vec![Rgb::new(1u8, 2, 3); 4], 2, 2));
//! let frame = src.to_frame().unwrap();
//! assert_eq!(frame.layout(), Layout::Rgb);
//! assert_eq!(&frame.samples()[..3], &[1, 2, 3]);
//! ```

use alloc::vec;
use alloc::vec::Vec;

use imgref::ImgVec;
use rgb::{Rgb, Rgba};

use crate::{GlitchError, PixelBuffer};

// ---------------------------------------------------------------------------
// Canonical layout
// ---------------------------------------------------------------------------

/// Interleaved 8-bit layout a frame is glitched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layout {
    Rgb,
    Rgba,
}

impl Layout {
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Palette-indexed image, one index byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    pub width: usize,
    pub height: usize,
    pub indices: Vec<u8>,
    pub palette: Vec<Rgb<u8>>,
    /// Palette index rendered fully transparent, if any.
    pub transparent: Option<u8>,
}

/// A decoded still image in whatever layout the decoder produced.
#[derive(Debug, Clone)]
pub enum SourceImage {
    Indexed(IndexedImage),
    Rgb(ImgVec<Rgb<u8>>),
    Rgba(ImgVec<Rgba<u8>>),
}

impl From<IndexedImage> for SourceImage {
    fn from(img: IndexedImage) -> Self {
        Self::Indexed(img)
    }
}

impl From<ImgVec<Rgb<u8>>> for SourceImage {
    fn from(img: ImgVec<Rgb<u8>>) -> Self {
        Self::Rgb(img)
    }
}

impl From<ImgVec<Rgba<u8>>> for SourceImage {
    fn from(img: ImgVec<Rgba<u8>>) -> Self {
        Self::Rgba(img)
    }
}

impl SourceImage {
    pub fn width(&self) -> usize {
        match self {
            Self::Indexed(img) => img.width,
            Self::Rgb(img) => img.width(),
            Self::Rgba(img) => img.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Self::Indexed(img) => img.height,
            Self::Rgb(img) => img.height(),
            Self::Rgba(img) => img.height(),
        }
    }

    /// Layout this source resolves to.
    pub fn layout(&self) -> Layout {
        match self {
            Self::Indexed(img) if img.transparent.is_some() => Layout::Rgba,
            Self::Indexed(_) | Self::Rgb(_) => Layout::Rgb,
            Self::Rgba(_) => Layout::Rgba,
        }
    }

    /// Resolve to a canonical, unglitched frame.
    pub fn to_frame(&self) -> Result<Frame, GlitchError> {
        let (width, height) = (self.width(), self.height());
        if width == 0 || height == 0 {
            return Err(GlitchError::unsupported(alloc::format!(
                "image has no pixels ({width}x{height})"
            )));
        }
        let layout = self.layout();
        let data = match self {
            Self::Indexed(img) => expand_indexed(img)?,
            Self::Rgb(img) => {
                let mut data = Vec::with_capacity(width * height * 3);
                for row in img.rows() {
                    data.extend_from_slice(bytemuck::cast_slice(row));
                }
                data
            }
            Self::Rgba(img) => {
                let mut data = Vec::with_capacity(width * height * 4);
                for row in img.rows() {
                    data.extend_from_slice(bytemuck::cast_slice(row));
                }
                data
            }
        };
        Ok(Frame {
            width,
            height,
            layout,
            data,
        })
    }
}

fn expand_indexed(img: &IndexedImage) -> Result<Vec<u8>, GlitchError> {
    let pixels = img.width * img.height;
    if img.indices.len() != pixels {
        return Err(GlitchError::unsupported(alloc::format!(
            "indexed image has {} indices for {}x{} pixels",
            img.indices.len(),
            img.width,
            img.height
        )));
    }
    let channels = if img.transparent.is_some() { 4 } else { 3 };
    let mut data = Vec::with_capacity(pixels * channels);
    for &index in &img.indices {
        let color = img.palette.get(index as usize).ok_or_else(|| {
            GlitchError::unsupported(alloc::format!(
                "palette index {index} out of range for {} colors",
                img.palette.len()
            ))
        })?;
        data.extend_from_slice(&[color.r, color.g, color.b]);
        if let Some(transparent) = img.transparent {
            data.push(if index == transparent { 0 } else { 0xFF });
        }
    }
    Ok(data)
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

/// One canonical frame: either a pristine source or a glitched pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    layout: Layout,
    data: Vec<u8>,
}

impl Frame {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Interleaved row-major samples.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.data
    }

    /// Fresh glitch buffer with input and output both set to this frame.
    pub fn to_buffer(&self) -> PixelBuffer {
        PixelBuffer::new(
            self.width,
            self.height,
            self.layout.channels(),
            self.data.clone(),
        )
        .expect("frame dimensions are always valid")
    }

    /// Take the output grid of a finished pass.
    pub(crate) fn from_buffer(buffer: PixelBuffer, layout: Layout) -> Self {
        debug_assert_eq!(buffer.channels(), layout.channels());
        Self {
            width: buffer.width(),
            height: buffer.height(),
            layout,
            data: buffer.into_output(),
        }
    }

    /// As an RGB image. Alpha, if present, is dropped.
    pub fn to_rgb_img(&self) -> ImgVec<Rgb<u8>> {
        let pixels: Vec<Rgb<u8>> = match self.layout {
            Layout::Rgb => bytemuck::cast_slice(&self.data).to_vec(),
            Layout::Rgba => self
                .data
                .chunks_exact(4)
                .map(|s| Rgb::new(s[0], s[1], s[2]))
                .collect(),
        };
        ImgVec::new(pixels, self.width, self.height)
    }

    /// As an RGBA image. RGB frames get alpha = 255.
    pub fn to_rgba_img(&self) -> ImgVec<Rgba<u8>> {
        let pixels: Vec<Rgba<u8>> = match self.layout {
            Layout::Rgba => bytemuck::cast_slice(&self.data).to_vec(),
            Layout::Rgb => {
                let mut out = vec![Rgba::default(); self.width * self.height];
                for (s, d) in self.data.chunks_exact(3).zip(out.iter_mut()) {
                    *d = Rgba::new(s[0], s[1], s[2], 0xFF);
                }
                out
            }
        };
        ImgVec::new(pixels, self.width, self.height)
    }
}
