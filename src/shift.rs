//! Horizontal band wrap-shifts.
//!
//! A band is a run of whole rows. Shifting it by `d` columns rotates every
//! row in the band: pixels pushed past one edge reappear at the other, so the
//! moved part and the wrapped remainder always tile `[0, width)` exactly.
//!
//! ```text
//! left by 1:   [0 1 2 3]  ->  [1 2 3 0]
//! right by 1:  [0 1 2 3]  ->  [3 0 1 2]
//! ```

use core::cmp::Ordering;
use core::ops::Range;

use rand::Rng;

use crate::{PixelBuffer, RangeError};

/// Half-open row interval `[start_y, start_y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Band {
    pub start_y: usize,
    pub height: usize,
}

impl Band {
    pub const fn new(start_y: usize, height: usize) -> Self {
        Self { start_y, height }
    }

    #[inline]
    pub fn rows(&self) -> Range<usize> {
        self.start_y..self.start_y + self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.height == 0
    }
}

/// One drawn band plus its signed column displacement.
///
/// Negative displacements shift left, positive ones shift right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BandShift {
    pub band: Band,
    pub displacement: isize,
}

/// Largest displacement magnitude at `intensity`: `floor(I² / 100 × W)`,
/// never more than the width itself.
pub fn max_offset(width: usize, intensity: f64) -> usize {
    let raw = (intensity * intensity / 100.0 * width as f64).floor();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(width)
    }
}

/// Band shifts per glitch pass: `2 × floor(intensity)`.
pub fn iterations(intensity: f64) -> usize {
    let whole = intensity.floor();
    if whole <= 0.0 {
        0
    } else {
        (whole as usize).saturating_mul(2)
    }
}

/// Draw a band and a displacement for an image of `width × height`.
///
/// Draw order is start row, band height, displacement. The start row may be
/// `height` itself, which yields an empty band.
pub fn draw_shift<R: Rng + ?Sized>(
    rng: &mut R,
    width: usize,
    height: usize,
    intensity: f64,
) -> BandShift {
    let start_y = rng.random_range(0..=height);
    let tallest = (height / 4).max(1);
    let band_height = rng.random_range(1..=tallest).min(height - start_y);
    let max = max_offset(width, intensity) as i64;
    let displacement = rng.random_range(-max..=max) as isize;
    BandShift {
        band: Band::new(start_y, band_height),
        displacement,
    }
}

/// Wrap-shift `band` of `buffer.input()` by `displacement` columns into
/// `buffer.output()`.
///
/// A zero displacement or an empty band writes nothing. `|displacement|`
/// must not exceed the width.
pub fn shift_band(
    buffer: &mut PixelBuffer,
    band: Band,
    displacement: isize,
) -> Result<(), RangeError> {
    let width = buffer.width();
    let amount = displacement.unsigned_abs();
    if amount > width {
        return Err(RangeError::OutOfBounds {
            start: 0,
            end: amount,
            limit: width,
        });
    }
    if band.is_empty() {
        return Ok(());
    }
    let rows = band.rows();
    match displacement.cmp(&0) {
        Ordering::Equal => Ok(()),
        Ordering::Less => {
            let moved = buffer.copy_region(rows.clone(), amount..width)?;
            let wrapped = buffer.copy_region(rows.clone(), 0..amount)?;
            buffer.assign_region(rows.clone(), 0..width - amount, &moved)?;
            buffer.assign_region(rows, width - amount..width, &wrapped)
        }
        Ordering::Greater => {
            let moved = buffer.copy_region(rows.clone(), 0..width - amount)?;
            let wrapped = buffer.copy_region(rows.clone(), width - amount..width)?;
            buffer.assign_region(rows.clone(), amount..width, &moved)?;
            buffer.assign_region(rows, 0..amount, &wrapped)
        }
    }
}
