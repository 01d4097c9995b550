//! Binarization of component artwork
//!
//! Turns a color or grayscale image into the 1 bpp image the row
//! classifier scans (1 = ink, 0 = background):
//!
//! 1. Optional border-color suppression (32 bpp only): pixels inside a
//!    [`ColorRange`] are masked, the mask is grown with a square brick and
//!    everything under it is painted white
//! 2. Conversion to 8 bpp gray
//! 3. Otsu or fixed threshold, dark pixels becoming ink
//! 4. Border-safe closing of the ink with a square brick
//!
//! 1 bpp input is already binary and is returned unchanged.

use crate::BinarizeError;
use bandcut_color::{
    ColorRange, color_in_range, compute_otsu_threshold, paint_through_mask, pix_convert_to_gray,
    threshold_to_binary,
};
use bandcut_core::{Pix, PixelDepth};
use bandcut_morph::{close_safe_brick, dilate_brick};

/// Border color masked out before thresholding (R 110..=150, G 80..=120, B 0).
pub const DEFAULT_BORDER_COLOR: ColorRange = ColorRange {
    lower: (110, 80, 0),
    upper: (150, 120, 0),
};

/// How the gray level separating ink from background is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdMethod {
    /// Otsu's method on the gray histogram
    #[default]
    Otsu,
    /// A fixed level; pixels at or below it are ink
    Fixed(u8),
}

/// Options for [`binarize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarizeOptions {
    /// Color to suppress before thresholding, `None` to keep every pixel
    pub border_color: Option<ColorRange>,
    /// Side of the square brick the border mask is dilated with
    pub border_dilation: u32,
    /// Threshold selection
    pub threshold: ThresholdMethod,
    /// Side of the square brick used to close the ink; 1 disables closing
    pub close_size: u32,
}

impl Default for BinarizeOptions {
    fn default() -> Self {
        Self {
            border_color: Some(DEFAULT_BORDER_COLOR),
            border_dilation: 15,
            threshold: ThresholdMethod::Otsu,
            close_size: 17,
        }
    }
}

impl BinarizeOptions {
    /// Set the suppressed border color
    pub fn with_border_color(mut self, range: Option<ColorRange>) -> Self {
        self.border_color = range;
        self
    }

    /// Set the border mask dilation size
    pub fn with_border_dilation(mut self, size: u32) -> Self {
        self.border_dilation = size;
        self
    }

    /// Set the threshold method
    pub fn with_threshold(mut self, threshold: ThresholdMethod) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the closing brick size
    pub fn with_close_size(mut self, size: u32) -> Self {
        self.close_size = size;
        self
    }
}

/// Convert `pix` to a 1 bpp image with ink as 1.
///
/// # Errors
///
/// Fails for depths the gray conversion does not handle.
pub fn binarize(pix: &Pix, options: &BinarizeOptions) -> Result<Pix, BinarizeError> {
    if pix.depth() == PixelDepth::Bit1 {
        tracing::debug!("input already binary");
        return Ok(pix.clone());
    }

    let suppressed;
    let source = match options.border_color {
        Some(range) if pix.depth() == PixelDepth::Bit32 => {
            suppressed = suppress_color(pix, &range, options.border_dilation)?;
            &suppressed
        }
        _ => pix,
    };

    let gray = pix_convert_to_gray(source)?;
    let threshold = match options.threshold {
        ThresholdMethod::Otsu => compute_otsu_threshold(&gray)?,
        ThresholdMethod::Fixed(t) => t,
    };
    let binary = threshold_to_binary(&gray, threshold)?;
    tracing::debug!(threshold, ink = binary.count_pixels(), "thresholded");

    if options.close_size <= 1 {
        return Ok(binary);
    }
    let closed = close_safe_brick(&binary, options.close_size, options.close_size)?;
    tracing::debug!(
        size = options.close_size,
        ink = closed.count_pixels(),
        "closed ink"
    );
    Ok(closed)
}

/// Paint every pixel within `dilation / 2` of a `range` pixel white.
fn suppress_color(pix: &Pix, range: &ColorRange, dilation: u32) -> Result<Pix, BinarizeError> {
    let mask = color_in_range(pix, range)?;
    let mask = if dilation > 1 {
        dilate_brick(&mask, dilation, dilation)?
    } else {
        mask
    };
    tracing::debug!(masked = mask.count_pixels(), "border color mask");
    Ok(paint_through_mask(pix, &mask, (255, 255, 255))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandcut_core::PixMut;
    use bandcut_test::synthetic;

    fn ink_rows(pix: &Pix) -> Vec<u32> {
        (0..pix.height())
            .filter(|&y| (0..pix.width()).any(|x| pix.get_pixel_unchecked(x, y) == 1))
            .collect()
    }

    #[test]
    fn test_binary_passes_through() {
        let pix = synthetic::binary_bands(20, 10, &[2..4]).unwrap();
        let out = binarize(&pix, &BinarizeOptions::default()).unwrap();
        assert_eq!(out.data(), pix.data());
    }

    #[test]
    fn test_rgb_dark_ink_becomes_foreground() {
        let pix = synthetic::rgb_bands(64, 80, &[10..20, 50..60], (0, 0, 0)).unwrap();
        let out = binarize(&pix, &BinarizeOptions::default()).unwrap();
        assert_eq!(out.depth(), PixelDepth::Bit1);
        let rows = ink_rows(&out);
        assert_eq!(rows, (10..20).chain(50..60).collect::<Vec<_>>());
    }

    #[test]
    fn test_gray_fixed_threshold() {
        let pix = synthetic::gray_bands(32, 20, &[5..8]).unwrap();
        let opts = BinarizeOptions::default()
            .with_threshold(ThresholdMethod::Fixed(128))
            .with_close_size(1);
        let out = binarize(&pix, &opts).unwrap();
        assert_eq!(ink_rows(&out), vec![5, 6, 7]);
    }

    #[test]
    fn test_closing_bridges_small_gaps() {
        let pix = synthetic::rgb_bands(64, 60, &[10..20, 25..35], (0, 0, 0)).unwrap();
        let open = binarize(&pix, &BinarizeOptions::default().with_close_size(1)).unwrap();
        assert!(!ink_rows(&open).contains(&22));

        let closed = binarize(&pix, &BinarizeOptions::default()).unwrap();
        assert_eq!(ink_rows(&closed), (10..35).collect::<Vec<_>>());
    }

    #[test]
    fn test_closing_keeps_thin_edge_gaps() {
        // Gaps narrower than the closing size at the top and bottom edges
        // stay empty: nothing outside the image counts as ink.
        let pix = synthetic::rgb_bands(64, 60, &[3..20, 40..57], (0, 0, 0)).unwrap();
        let out = binarize(&pix, &BinarizeOptions::default()).unwrap();
        assert_eq!(
            ink_rows(&out),
            (3..20).chain(40..57).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_border_color_is_suppressed() {
        let mut pm = synthetic::rgb_bands(64, 90, &[60..70], (0, 0, 0))
            .unwrap()
            .to_mut();
        for y in 10..14 {
            for x in 0..64 {
                pm.set_rgb(x, y, 130, 100, 0).unwrap();
            }
        }
        let pix: Pix = pm.into();
        let fixed = BinarizeOptions::default().with_threshold(ThresholdMethod::Fixed(128));

        let kept = binarize(&pix, &fixed.clone().with_border_color(None)).unwrap();
        assert_eq!(ink_rows(&kept).first(), Some(&10));

        let suppressed = binarize(&pix, &fixed).unwrap();
        assert_eq!(ink_rows(&suppressed), (60..70).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_close_size_disables_closing() {
        let mut pm = PixMut::new(8, 8, PixelDepth::Bit8).unwrap();
        pm.set_all();
        pm.set_pixel(3, 3, 0).unwrap();
        let pix: Pix = pm.into();
        let out = binarize(&pix, &BinarizeOptions::default().with_close_size(0)).unwrap();
        assert_eq!(out.count_pixels(), 1);
    }
}
