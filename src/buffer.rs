//! Double-grid pixel storage for a single glitch pass.
//!
//! A [`PixelBuffer`] holds two row-major sample grids of identical shape:
//! `input`, the untouched snapshot every operation reads from, and `output`,
//! which operations overwrite in place. Region and channel copies are
//! bounds-checked, and assignments must match the destination shape exactly.
//!
//! ```rust
//! use glitchwave::PixelBuffer;
//!
//! let samples: Vec<u8> = (0..16).collect();
//! let mut buf = PixelBuffer::new(4, 4, 1, samples).unwrap();
//!
//! // Move columns 1..4 of the top row to columns 0..3.
//! let moved = buf.copy_region(0..1, 1..4).unwrap();
//! buf.assign_region(0..1, 0..3, &moved).unwrap();
//! assert_eq!(&buf.output()[..4], &[1, 2, 3, 3]);
//! ```

use alloc::vec::Vec;
use core::ops::Range;

use crate::RangeError;

// ---------------------------------------------------------------------------
// Range checks
// ---------------------------------------------------------------------------

#[inline]
fn check_range(range: &Range<usize>, limit: usize) -> Result<(), RangeError> {
    if range.start > range.end || range.end > limit {
        Err(RangeError::OutOfBounds {
            start: range.start,
            end: range.end,
            limit,
        })
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// An owned rectangle of samples lifted out of a [`PixelBuffer`].
///
/// Produced by [`PixelBuffer::copy_region`] (all channels) and
/// [`PixelBuffer::copy_channel`] (one channel, `channels() == 1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl Region {
    /// Wrap raw samples. `data.len()` must equal `width * height * channels`.
    pub fn from_samples(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, RangeError> {
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(RangeError::SampleCount {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn row_len(&self) -> usize {
        self.width * self.channels
    }

    /// Samples of row `y` of the region.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let len = self.row_len();
        &self.data[y * len..(y + 1) * len]
    }

    fn check_shape(&self, width: usize, height: usize, channels: usize) -> Result<(), RangeError> {
        if self.width != width || self.height != height || self.channels != channels {
            return Err(RangeError::ShapeMismatch {
                expected: (width * channels, height),
                actual: (self.row_len(), self.height),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PixelBuffer
// ---------------------------------------------------------------------------

/// Input snapshot plus mutable output for one glitch pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    channels: usize,
    input: Vec<u8>,
    output: Vec<u8>,
}

impl PixelBuffer {
    /// Build a buffer whose input and output both start as `samples`.
    ///
    /// `samples` is row-major with `channels` interleaved samples per pixel.
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        samples: Vec<u8>,
    ) -> Result<Self, RangeError> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(RangeError::Empty {
                width,
                height,
                channels,
            });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(RangeError::SampleCount {
                expected: usize::MAX,
                actual: samples.len(),
            })?;
        if samples.len() != expected {
            return Err(RangeError::SampleCount {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            output: samples.clone(),
            input: samples,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Samples per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width * self.channels
    }

    /// The read-only snapshot.
    #[inline]
    pub fn input(&self) -> &[u8] {
        &self.input
    }

    /// The grid operations write to.
    #[inline]
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Output rows, each `stride()` samples long.
    pub fn output_rows_mut(&mut self) -> core::slice::ChunksExactMut<'_, u8> {
        let stride = self.stride();
        self.output.chunks_exact_mut(stride)
    }

    /// One output sample, or `None` outside the buffer.
    pub fn output_sample(&self, x: usize, y: usize, channel: usize) -> Option<u8> {
        if x >= self.width || y >= self.height || channel >= self.channels {
            return None;
        }
        Some(self.output[y * self.stride() + x * self.channels + channel])
    }

    /// Drop the snapshot and keep the output samples.
    pub fn into_output(self) -> Vec<u8> {
        self.output
    }

    #[inline]
    fn check_channel(&self, channel: usize) -> Result<(), RangeError> {
        if channel >= self.channels {
            Err(RangeError::NoSuchChannel {
                channel,
                channels: self.channels,
            })
        } else {
            Ok(())
        }
    }

    // -----------------------------------------------------------------------
    // Whole-pixel regions
    // -----------------------------------------------------------------------

    /// Copy all channels of `input[rows, cols]`.
    pub fn copy_region(
        &self,
        rows: Range<usize>,
        cols: Range<usize>,
    ) -> Result<Region, RangeError> {
        check_range(&rows, self.height)?;
        check_range(&cols, self.width)?;
        let stride = self.stride();
        let c = self.channels;
        let mut data = Vec::with_capacity(rows.len() * cols.len() * c);
        for y in rows.clone() {
            let row = &self.input[y * stride..(y + 1) * stride];
            data.extend_from_slice(&row[cols.start * c..cols.end * c]);
        }
        Ok(Region {
            width: cols.len(),
            height: rows.len(),
            channels: c,
            data,
        })
    }

    /// Overwrite `output[rows, cols]` with `region`.
    ///
    /// The region must be exactly `cols.len()` wide, `rows.len()` tall and
    /// carry every channel of this buffer.
    pub fn assign_region(
        &mut self,
        rows: Range<usize>,
        cols: Range<usize>,
        region: &Region,
    ) -> Result<(), RangeError> {
        check_range(&rows, self.height)?;
        check_range(&cols, self.width)?;
        region.check_shape(cols.len(), rows.len(), self.channels)?;
        let stride = self.stride();
        let c = self.channels;
        for (i, y) in rows.enumerate() {
            let start = y * stride + cols.start * c;
            self.output[start..start + cols.len() * c].copy_from_slice(region.row(i));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Single-channel regions (step = channels)
    // -----------------------------------------------------------------------

    /// Copy one channel of `input[rows, cols]` into a 1-channel region.
    pub fn copy_channel(
        &self,
        rows: Range<usize>,
        cols: Range<usize>,
        channel: usize,
    ) -> Result<Region, RangeError> {
        check_range(&rows, self.height)?;
        check_range(&cols, self.width)?;
        self.check_channel(channel)?;
        let stride = self.stride();
        let c = self.channels;
        let mut data = Vec::with_capacity(rows.len() * cols.len());
        for y in rows.clone() {
            let row = &self.input[y * stride..(y + 1) * stride];
            data.extend(
                row[cols.start * c..cols.end * c]
                    .chunks_exact(c)
                    .map(|px| px[channel]),
            );
        }
        Ok(Region {
            width: cols.len(),
            height: rows.len(),
            channels: 1,
            data,
        })
    }

    /// Write a 1-channel region into `channel` of `output[rows, cols]`.
    ///
    /// Samples of every other channel are left as they are.
    pub fn assign_channel(
        &mut self,
        rows: Range<usize>,
        cols: Range<usize>,
        channel: usize,
        region: &Region,
    ) -> Result<(), RangeError> {
        check_range(&rows, self.height)?;
        check_range(&cols, self.width)?;
        self.check_channel(channel)?;
        region.check_shape(cols.len(), rows.len(), 1)?;
        let stride = self.stride();
        let c = self.channels;
        for (i, y) in rows.enumerate() {
            let row = &mut self.output[y * stride..(y + 1) * stride];
            for (px, &v) in row[cols.start * c..cols.end * c]
                .chunks_exact_mut(c)
                .zip(region.row(i))
            {
                px[channel] = v;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn ramp(width: usize, height: usize, channels: usize) -> PixelBuffer {
        let n = width * height * channels;
        PixelBuffer::new(width, height, channels, (0..n).map(|i| (i % 251) as u8).collect())
            .unwrap()
    }

    #[test]
    fn new_rejects_wrong_sample_count() {
        assert_eq!(
            PixelBuffer::new(2, 2, 3, vec![0; 11]),
            Err(RangeError::SampleCount {
                expected: 12,
                actual: 11
            })
        );
    }

    #[test]
    fn new_rejects_empty_dimensions() {
        assert!(matches!(
            PixelBuffer::new(0, 4, 3, vec![]),
            Err(RangeError::Empty { .. })
        ));
        assert!(matches!(
            PixelBuffer::new(4, 4, 0, vec![]),
            Err(RangeError::Empty { .. })
        ));
    }

    #[test]
    fn copy_region_reads_input_not_output() {
        let mut buf = ramp(4, 2, 1);
        let zeros = Region::from_samples(4, 2, 1, vec![0; 8]).unwrap();
        buf.assign_region(0..2, 0..4, &zeros).unwrap();
        let copied = buf.copy_region(0..2, 0..4).unwrap();
        assert_eq!(copied.samples(), &[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(buf.output(), &[0; 8]);
    }

    #[test]
    fn copy_region_keeps_interleaved_channels() {
        let buf = ramp(3, 2, 3);
        let region = buf.copy_region(1..2, 1..3).unwrap();
        assert_eq!(region.width(), 2);
        assert_eq!(region.height(), 1);
        assert_eq!(region.samples(), &[12, 13, 14, 15, 16, 17]);
    }

    #[test]
    fn empty_ranges_are_allowed() {
        let mut buf = ramp(4, 4, 3);
        let empty = buf.copy_region(2..2, 0..4).unwrap();
        assert!(empty.samples().is_empty());
        buf.assign_region(2..2, 0..4, &empty).unwrap();
        let empty_cols = buf.copy_region(0..4, 4..4).unwrap();
        buf.assign_region(0..4, 0..0, &empty_cols).unwrap();
        assert_eq!(buf.output(), buf.input());
    }

    #[test]
    fn out_of_bounds_ranges_are_rejected() {
        let buf = ramp(4, 4, 1);
        assert_eq!(
            buf.copy_region(0..5, 0..4),
            Err(RangeError::OutOfBounds {
                start: 0,
                end: 5,
                limit: 4
            })
        );
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = buf.copy_region(0..4, 3..1);
        assert!(matches!(reversed, Err(RangeError::OutOfBounds { .. })));
    }

    #[test]
    fn assign_rejects_shape_mismatch() {
        let mut buf = ramp(4, 4, 1);
        let region = buf.copy_region(0..1, 0..3).unwrap();
        assert_eq!(
            buf.assign_region(0..1, 0..4, &region),
            Err(RangeError::ShapeMismatch {
                expected: (4, 1),
                actual: (3, 1)
            })
        );
        assert_eq!(
            buf.assign_region(0..2, 0..3, &region),
            Err(RangeError::ShapeMismatch {
                expected: (3, 2),
                actual: (3, 1)
            })
        );
        // Nothing written on failure.
        assert_eq!(buf.output(), buf.input());
    }

    #[test]
    fn whole_pixel_region_cannot_fill_channel_slot() {
        let mut buf = ramp(2, 2, 3);
        let region = buf.copy_region(0..2, 0..2).unwrap();
        assert!(matches!(
            buf.assign_channel(0..2, 0..2, 0, &region),
            Err(RangeError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn channel_copy_steps_by_channel_count() {
        let buf = ramp(3, 2, 4);
        let green = buf.copy_channel(0..2, 0..3, 1).unwrap();
        assert_eq!(green.channels(), 1);
        assert_eq!(green.samples(), &[1, 5, 9, 13, 17, 21]);
    }

    #[test]
    fn channel_assign_leaves_other_channels() {
        let mut buf = ramp(2, 2, 3);
        let ones = Region::from_samples(2, 2, 1, vec![200; 4]).unwrap();
        buf.assign_channel(0..2, 0..2, 2, &ones).unwrap();
        for (out, inp) in buf.output().chunks_exact(3).zip(buf.input().chunks_exact(3)) {
            assert_eq!(out[0], inp[0]);
            assert_eq!(out[1], inp[1]);
            assert_eq!(out[2], 200);
        }
    }

    #[test]
    fn channel_index_is_checked() {
        let buf = ramp(2, 2, 3);
        assert_eq!(
            buf.copy_channel(0..2, 0..2, 3),
            Err(RangeError::NoSuchChannel {
                channel: 3,
                channels: 3
            })
        );
    }

    #[test]
    fn output_sample_is_bounds_checked() {
        let buf = ramp(2, 2, 3);
        assert_eq!(buf.output_sample(1, 1, 2), Some(11));
        assert_eq!(buf.output_sample(2, 0, 0), None);
        assert_eq!(buf.output_sample(0, 0, 3), None);
    }
}
