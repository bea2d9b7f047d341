//! Single-channel 2D wrap displacement.
//!
//! One channel of the input is laid back into the output starting at row
//! `offset_y`. The first input row lands on row `offset_y` rotated right by
//! `offset_x` columns; the remaining rows follow unrotated and wrap around the
//! bottom edge back to row 0. Every other channel keeps whatever the output
//! already held.

use rand::Rng;

use crate::{PixelBuffer, RangeError};

/// Displacement of one channel, already normalized into the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelOffset {
    pub offset_x: usize,
    pub offset_y: usize,
    pub channel: usize,
}

impl ChannelOffset {
    /// Normalize signed offsets into `[0, width) × [0, height)`.
    ///
    /// Negative offsets count back from the far edge.
    pub fn wrapped(
        offset_x: isize,
        offset_y: isize,
        channel: usize,
        width: usize,
        height: usize,
    ) -> Self {
        Self {
            offset_x: offset_x.rem_euclid(width as isize) as usize,
            offset_y: offset_y.rem_euclid(height as isize) as usize,
            channel,
        }
    }
}

/// Draw an offset for intensity `intensity`.
///
/// Both axes are uniform over `[-floor(2I), floor(2I)]`; the channel is
/// uniform over `[0, channels)`. Draw order is x, y, channel.
pub fn draw_offset<R: Rng + ?Sized>(
    rng: &mut R,
    width: usize,
    height: usize,
    channels: usize,
    intensity: f64,
) -> ChannelOffset {
    let reach = (2.0 * intensity).floor().max(0.0) as i64;
    let offset_x = rng.random_range(-reach..=reach) as isize;
    let offset_y = rng.random_range(-reach..=reach) as isize;
    let channel = rng.random_range(0..channels);
    ChannelOffset::wrapped(offset_x, offset_y, channel, width, height)
}

/// Copy `offset.channel` of `buffer.input()` into `buffer.output()` displaced
/// by `offset`.
pub fn offset_channel(buffer: &mut PixelBuffer, offset: ChannelOffset) -> Result<(), RangeError> {
    let width = buffer.width();
    let height = buffer.height();
    let ChannelOffset {
        offset_x: ox,
        offset_y: oy,
        channel,
    } = offset;
    if ox >= width {
        return Err(RangeError::OutOfBounds {
            start: ox,
            end: ox + 1,
            limit: width,
        });
    }
    if oy >= height {
        return Err(RangeError::OutOfBounds {
            start: oy,
            end: oy + 1,
            limit: height,
        });
    }

    // Input row 0 -> output row oy, rotated right by ox.
    let head = buffer.copy_channel(0..1, 0..width - ox, channel)?;
    let tail = buffer.copy_channel(0..1, width - ox..width, channel)?;
    buffer.assign_channel(oy..oy + 1, ox..width, channel, &head)?;
    buffer.assign_channel(oy..oy + 1, 0..ox, channel, &tail)?;

    // Input rows 1..H-oy -> output rows oy+1..H.
    let below = buffer.copy_channel(1..height - oy, 0..width, channel)?;
    buffer.assign_channel(oy + 1..height, 0..width, channel, &below)?;

    // Input rows H-oy..H -> output rows 0..oy.
    let above = buffer.copy_channel(height - oy..height, 0..width, channel)?;
    buffer.assign_channel(0..oy, 0..width, channel, &above)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rgb_ramp(width: usize, height: usize) -> PixelBuffer {
        let n = width * height * 3;
        PixelBuffer::new(width, height, 3, (0..n).map(|i| (i % 251) as u8).collect()).unwrap()
    }

    fn channel_plane(samples: &[u8], channels: usize, channel: usize) -> Vec<u8> {
        samples.chunks_exact(channels).map(|px| px[channel]).collect()
    }

    #[test]
    fn negative_offsets_wrap() {
        let o = ChannelOffset::wrapped(-1, -3, 2, 10, 8);
        assert_eq!((o.offset_x, o.offset_y, o.channel), (9, 5, 2));
        let o = ChannelOffset::wrapped(-10, 8, 0, 10, 8);
        assert_eq!((o.offset_x, o.offset_y), (0, 0));
    }

    #[test]
    fn offsets_larger_than_image_still_land_inside() {
        let o = ChannelOffset::wrapped(-13, 17, 0, 4, 4);
        assert!(o.offset_x < 4 && o.offset_y < 4);
    }

    #[test]
    fn zero_offset_reproduces_channel() {
        let mut buf = rgb_ramp(5, 4);
        offset_channel(&mut buf, ChannelOffset::wrapped(0, 0, 1, 5, 4)).unwrap();
        assert_eq!(buf.output(), buf.input());
    }

    #[test]
    fn single_channel_layout_matches_reference() {
        // 4x3, one channel, values 0..12, offset (1, 1).
        let mut buf = PixelBuffer::new(4, 3, 1, (0..12).collect()).unwrap();
        offset_channel(&mut buf, ChannelOffset::wrapped(1, 1, 0, 4, 3)).unwrap();
        assert_eq!(
            buf.output(),
            &[
                8, 9, 10, 11, // input row 2 wraps to the top
                3, 0, 1, 2, // input row 0, rotated right by 1
                4, 5, 6, 7, // input row 1
            ]
        );
    }

    #[test]
    fn only_target_channel_changes() {
        let mut buf = rgb_ramp(7, 6);
        offset_channel(&mut buf, ChannelOffset::wrapped(3, -2, 1, 7, 6)).unwrap();
        for c in [0, 2] {
            assert_eq!(
                channel_plane(buf.output(), 3, c),
                channel_plane(buf.input(), 3, c),
                "channel {c} moved"
            );
        }
        assert_ne!(
            channel_plane(buf.output(), 3, 1),
            channel_plane(buf.input(), 3, 1)
        );
    }

    #[test]
    fn target_channel_is_a_permutation_of_input() {
        let mut buf = rgb_ramp(9, 5);
        offset_channel(&mut buf, ChannelOffset::wrapped(4, 3, 0, 9, 5)).unwrap();
        let mut out = channel_plane(buf.output(), 3, 0);
        let mut inp = channel_plane(buf.input(), 3, 0);
        out.sort_unstable();
        inp.sort_unstable();
        assert_eq!(out, inp);
    }

    #[test]
    fn unnormalized_offset_is_rejected() {
        let mut buf = rgb_ramp(4, 4);
        let bad = ChannelOffset {
            offset_x: 4,
            offset_y: 0,
            channel: 0,
        };
        assert!(offset_channel(&mut buf, bad).is_err());
    }

    #[test]
    fn drawn_offsets_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let o = draw_offset(&mut rng, 3, 2, 4, 10.0);
            assert!(o.offset_x < 3);
            assert!(o.offset_y < 2);
            assert!(o.channel < 4);
        }
    }

    #[test]
    fn drawn_offsets_reach_both_sides() {
        // Reach at intensity 5 is 10; negative draws wrap to the far edge.
        let mut rng = StdRng::seed_from_u64(21);
        let xs: Vec<usize> = (0..500)
            .map(|_| draw_offset(&mut rng, 100, 100, 3, 5.0).offset_x)
            .collect();
        assert!(xs.iter().all(|&x| x <= 10 || x >= 90));
        assert!(xs.iter().any(|&x| (1..=10).contains(&x)));
        assert!(xs.iter().any(|&x| x >= 90));
    }

    #[test]
    fn drawn_offsets_apply_cleanly() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut buf = rgb_ramp(6, 5);
        for _ in 0..200 {
            let o = draw_offset(&mut rng, 6, 5, 3, 7.5);
            offset_channel(&mut buf, o).unwrap();
        }
    }
}
