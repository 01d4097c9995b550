//! Grayscale conversion
//!
//! Thin dispatch over the core depth conversions, mapping their errors into
//! [`ColorError`](crate::ColorError).

use crate::ColorResult;
use bandcut_core::{Pix, PixelDepth};

/// Convert an image to 8-bit grayscale
///
/// - 32 bpp: luminance, 0.3R + 0.5G + 0.2B
/// - 8 bpp: copy
/// - 1 bpp: foreground (1) becomes black, background white
/// - 2/4/16 bpp: rescaled to 0..=255
pub fn pix_convert_to_gray(pix: &Pix) -> ColorResult<Pix> {
    let gray = match pix.depth() {
        PixelDepth::Bit32 => pix.convert_rgb_to_luminance()?,
        _ => pix.convert_to_8()?,
    };
    Ok(gray)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandcut_core::PixMut;

    #[test]
    fn test_rgb_to_gray() {
        let mut pm = PixMut::new(2, 1, PixelDepth::Bit32).unwrap();
        pm.set_rgb(0, 0, 100, 200, 50).unwrap();
        pm.set_rgb(1, 0, 255, 255, 255).unwrap();
        let gray = pix_convert_to_gray(&pm.into()).unwrap();
        assert_eq!(gray.depth(), PixelDepth::Bit8);
        // 30 + 100 + 10
        assert_eq!(gray.get_pixel(0, 0), Some(140));
        assert_eq!(gray.get_pixel(1, 0), Some(255));
    }

    #[test]
    fn test_binary_to_gray() {
        let mut pm = PixMut::new(2, 1, PixelDepth::Bit1).unwrap();
        pm.set_pixel(0, 0, 1).unwrap();
        let gray = pix_convert_to_gray(&pm.into()).unwrap();
        assert_eq!(gray.get_pixel(0, 0), Some(0));
        assert_eq!(gray.get_pixel(1, 0), Some(255));
    }
}
