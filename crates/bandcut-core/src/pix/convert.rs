//! Depth conversion
//!
//! Only the conversions bandcut needs: any depth to 8 bpp gray, and
//! 32 bpp RGB to gray with configurable channel weights.

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Default luminance weights (0.3R + 0.5G + 0.2B).
pub const RED_WEIGHT: f32 = 0.3;
pub const GREEN_WEIGHT: f32 = 0.5;
pub const BLUE_WEIGHT: f32 = 0.2;

impl Pix {
    /// Convert any-depth image to 8-bit grayscale.
    ///
    /// Conversion rules:
    /// - **1 bpp**: 0 -> 255 (white background), 1 -> 0 (black foreground)
    /// - **2 bpp**: evenly spaced values (0, 85, 170, 255)
    /// - **4 bpp**: evenly spaced values (0, 17, 34, ... 255)
    /// - **8 bpp**: copy
    /// - **16 bpp**: most significant byte
    /// - **32 bpp**: luminance with the default weights
    ///
    /// # Examples
    ///
    /// ```
    /// use bandcut_core::{Pix, PixelDepth};
    ///
    /// let pix32 = Pix::new(10, 10, PixelDepth::Bit32).unwrap();
    /// let pix8 = pix32.convert_to_8().unwrap();
    /// assert_eq!(pix8.depth(), PixelDepth::Bit8);
    /// ```
    pub fn convert_to_8(&self) -> Result<Pix> {
        let map: fn(u32) -> u32 = match self.depth() {
            PixelDepth::Bit8 => return Ok(self.deep_clone()),
            PixelDepth::Bit32 => return self.convert_rgb_to_luminance(),
            PixelDepth::Bit1 => |v| if v == 0 { 255 } else { 0 },
            PixelDepth::Bit2 => |v| v * 85,
            PixelDepth::Bit4 => |v| v * 17,
            PixelDepth::Bit16 => |v| v >> 8,
        };

        let w = self.width();
        let h = self.height();
        let mut result = PixMut::new(w, h, PixelDepth::Bit8)?;
        result.set_resolution(self.xres(), self.yres());
        for y in 0..h {
            for x in 0..w {
                result.set_pixel_unchecked(x, y, map(self.get_pixel_unchecked(x, y)));
            }
        }
        Ok(result.into())
    }

    /// Convert 32 bpp RGB to 8 bpp grayscale using standard luminance weights.
    pub fn convert_rgb_to_luminance(&self) -> Result<Pix> {
        self.convert_rgb_to_gray(0.0, 0.0, 0.0)
    }

    /// Convert 32 bpp RGB to 8 bpp grayscale with custom weights.
    ///
    /// If all weights are 0.0, the default luminance weights are used.
    /// Weights are normalized to sum to 1.0 if they don't already.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 32 bpp.
    /// Returns [`Error::InvalidParameter`] if any weight is negative.
    pub fn convert_rgb_to_gray(&self, rwt: f32, gwt: f32, bwt: f32) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        if rwt < 0.0 || gwt < 0.0 || bwt < 0.0 {
            return Err(Error::InvalidParameter("weights must all be >= 0.0".into()));
        }

        let (rwt, gwt, bwt) = if rwt == 0.0 && gwt == 0.0 && bwt == 0.0 {
            (RED_WEIGHT, GREEN_WEIGHT, BLUE_WEIGHT)
        } else {
            let sum = rwt + gwt + bwt;
            if (sum - 1.0).abs() > 0.0001 {
                (rwt / sum, gwt / sum, bwt / sum)
            } else {
                (rwt, gwt, bwt)
            }
        };

        let w = self.width();
        let h = self.height();
        let mut result = PixMut::new(w, h, PixelDepth::Bit8)?;
        result.set_resolution(self.xres(), self.yres());

        for y in 0..h {
            for x in 0..w {
                let pixel = self.get_pixel_unchecked(x, y);
                let r = color::red(pixel) as f32;
                let g = color::green(pixel) as f32;
                let b = color::blue(pixel) as f32;
                let gray = (rwt * r + gwt * g + bwt * b + 0.5) as u32;
                result.set_pixel_unchecked(x, y, gray.min(255));
            }
        }

        Ok(result.into())
    }
}
