//! Color-range masks
//!
//! Selects pixels of a 32 bpp image whose channels all fall inside an
//! inclusive RGB box, and repaints the pixels under a 1 bpp mask.

use crate::{ColorError, ColorResult};
use bandcut_core::{Pix, PixMut, PixelDepth, color};

/// Inclusive per-channel RGB bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    /// Lower bound (r, g, b), inclusive
    pub lower: (u8, u8, u8),
    /// Upper bound (r, g, b), inclusive
    pub upper: (u8, u8, u8),
}

impl ColorRange {
    /// Create a range from inclusive lower and upper (r, g, b) bounds.
    pub fn new(lower: (u8, u8, u8), upper: (u8, u8, u8)) -> Self {
        Self { lower, upper }
    }

    /// Whether (r, g, b) lies inside the range on every channel.
    #[inline]
    pub fn contains(&self, r: u8, g: u8, b: u8) -> bool {
        (self.lower.0..=self.upper.0).contains(&r)
            && (self.lower.1..=self.upper.1).contains(&g)
            && (self.lower.2..=self.upper.2).contains(&b)
    }
}

/// Build a 1 bpp mask of the pixels inside `range`.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedDepth`] unless `pix` is 32 bpp.
pub fn color_in_range(pix: &Pix, range: &ColorRange) -> ColorResult<Pix> {
    check_rgb(pix)?;

    let (w, h) = (pix.width(), pix.height());
    let mut mask = PixMut::new(w, h, PixelDepth::Bit1)?;
    for y in 0..h {
        for x in 0..w {
            let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
            if range.contains(r, g, b) {
                mask.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    Ok(mask.into())
}

/// Return a copy of `pix` with every pixel under `mask` set to `rgb`.
///
/// # Errors
///
/// `pix` must be 32 bpp and `mask` a 1 bpp image of the same size.
pub fn paint_through_mask(pix: &Pix, mask: &Pix, rgb: (u8, u8, u8)) -> ColorResult<Pix> {
    check_rgb(pix)?;
    if mask.depth() != PixelDepth::Bit1 {
        return Err(ColorError::UnsupportedDepth {
            expected: "1-bpp mask",
            actual: mask.depth().bits(),
        });
    }
    if mask.width() != pix.width() || mask.height() != pix.height() {
        return Err(ColorError::InvalidParameters(format!(
            "mask is {}x{}, image is {}x{}",
            mask.width(),
            mask.height(),
            pix.width(),
            pix.height()
        )));
    }

    let value = color::compose_rgb(rgb.0, rgb.1, rgb.2);
    let mut out = pix.to_mut();
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            if mask.get_pixel_unchecked(x, y) != 0 {
                out.set_pixel_unchecked(x, y, value);
            }
        }
    }
    Ok(out.into())
}

fn check_rgb(pix: &Pix) -> ColorResult<()> {
    if pix.depth() != PixelDepth::Bit32 {
        return Err(ColorError::UnsupportedDepth {
            expected: "32-bpp RGB",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}
