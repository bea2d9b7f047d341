//! Scan-line overlay.

use crate::PixelBuffer;

/// Black out the color samples of every even output row.
///
/// Channels 0..3 of rows 0, 2, 4, … are set to 0. A fourth (alpha) channel
/// is kept. Buffers with fewer than three channels are left alone.
pub fn apply_scanlines(buffer: &mut PixelBuffer) {
    let channels = buffer.channels();
    if channels < 3 {
        return;
    }
    for row in buffer.output_rows_mut().step_by(2) {
        for px in row.chunks_exact_mut(channels) {
            px[..3].fill(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn even_rows_lose_color_but_keep_alpha() {
        let mut buf = PixelBuffer::new(2, 3, 4, vec![9; 24]).unwrap();
        apply_scanlines(&mut buf);
        assert_eq!(&buf.output()[..8], &[0, 0, 0, 9, 0, 0, 0, 9]);
        assert_eq!(&buf.output()[8..16], &[9; 8]);
        assert_eq!(&buf.output()[16..], &[0, 0, 0, 9, 0, 0, 0, 9]);
    }

    #[test]
    fn rgb_even_rows_are_black() {
        let mut buf = PixelBuffer::new(3, 2, 3, vec![200; 18]).unwrap();
        apply_scanlines(&mut buf);
        assert_eq!(&buf.output()[..9], &[0; 9]);
        assert_eq!(&buf.output()[9..], &[200; 9]);
    }

    #[test]
    fn fewer_than_three_channels_untouched() {
        let mut buf = PixelBuffer::new(2, 2, 2, vec![5; 8]).unwrap();
        apply_scanlines(&mut buf);
        assert_eq!(buf.output(), &[5; 8]);
    }

    #[test]
    fn input_snapshot_is_not_modified() {
        let mut buf = PixelBuffer::new(2, 2, 3, vec![1; 12]).unwrap();
        apply_scanlines(&mut buf);
        assert_eq!(buf.input(), &[1; 12]);
    }
}
