//! Pixel counting

use super::{Pix, PixelDepth, last_word_mask};

impl Pix {
    /// Count the number of ON (foreground) pixels in a binary image.
    ///
    /// Padding bits past the image width are ignored. Returns 0 for
    /// images that are not 1 bpp.
    pub fn count_pixels(&self) -> u64 {
        if self.depth() != PixelDepth::Bit1 {
            return 0;
        }
        let mask = last_word_mask(self.width(), PixelDepth::Bit1);
        (0..self.height())
            .map(|y| count_row_bits(self.row_data(y), mask))
            .sum()
    }
}

fn count_row_bits(line: &[u32], last_mask: u32) -> u64 {
    let Some((last, body)) = line.split_last() else {
        return 0;
    };
    let body: u64 = body.iter().map(|w| u64::from(w.count_ones())).sum();
    body + u64::from((last & last_mask).count_ones())
}
