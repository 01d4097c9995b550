//! Synthetic fixtures
//!
//! Builds stacked-component images from lists of row bands. A band is a
//! half-open row range `[start, end)` whose rows carry ink in the middle
//! half of the image width; every other row is pure background.
//!
//! Ink encoding per depth:
//!
//! | Depth | Background | Ink |
//! |-------|------------|-----|
//! | 1 bpp | 0 | 1 |
//! | 8 bpp | 255 | 0 |
//! | 32 bpp | white | caller-supplied RGB |

use bandcut_core::{Pix, PixMut, PixelDepth, Result, color};
use std::ops::Range;

/// Columns that carry ink in a band row: the middle half, at least one pixel.
fn ink_columns(width: u32) -> Range<u32> {
    let start = width / 4;
    let end = (width - width / 4).max(start + 1);
    start..end.min(width)
}

fn paint_bands(pm: &mut PixMut, bands: &[Range<u32>], value: u32) {
    let cols = ink_columns(pm.width());
    let height = pm.height();
    for band in bands {
        for y in band.start..band.end.min(height) {
            for x in cols.clone() {
                pm.set_pixel_unchecked(x, y, value);
            }
        }
    }
}

/// 1 bpp image with ink in the given row bands.
pub fn binary_bands(width: u32, height: u32, bands: &[Range<u32>]) -> Result<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit1)?;
    paint_bands(&mut pm, bands, 1);
    Ok(pm.into())
}

/// 1 bpp image where every row is occupied except those in `empty_runs`.
///
/// Occupied rows carry a single ink pixel at a row-dependent column, so
/// the occupancy test has to scan past the first word on wide images.
pub fn binary_with_empty_runs(width: u32, height: u32, empty_runs: &[Range<u32>]) -> Result<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit1)?;
    for y in 0..height {
        if empty_runs.iter().any(|r| r.contains(&y)) {
            continue;
        }
        pm.set_pixel_unchecked((y * 37) % width, y, 1);
    }
    Ok(pm.into())
}

/// 1 bpp image with single ink pixels at the given points.
pub fn binary_points(width: u32, height: u32, points: &[(u32, u32)]) -> Result<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit1)?;
    for &(x, y) in points {
        pm.set_pixel(x, y, 1)?;
    }
    Ok(pm.into())
}

/// 8 bpp white image with black ink in the given row bands.
pub fn gray_bands(width: u32, height: u32, bands: &[Range<u32>]) -> Result<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit8)?;
    pm.set_all();
    paint_bands(&mut pm, bands, 0);
    Ok(pm.into())
}

/// 32 bpp white image with `ink` colored blocks in the given row bands.
pub fn rgb_bands(width: u32, height: u32, bands: &[Range<u32>], ink: (u8, u8, u8)) -> Result<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit32)?;
    pm.set_all();
    paint_bands(&mut pm, bands, color::compose_rgb(ink.0, ink.1, ink.2));
    Ok(pm.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_bands() {
        let pix = binary_bands(40, 10, &[2..4]).unwrap();
        assert_eq!(pix.get_pixel(20, 2), Some(1));
        assert_eq!(pix.get_pixel(20, 4), Some(0));
        assert_eq!(pix.get_pixel(0, 2), Some(0));
        assert_eq!(pix.count_pixels(), 2 * 20);
    }

    #[test]
    fn test_binary_with_empty_runs() {
        let pix = binary_with_empty_runs(100, 8, &[0..2, 5..6]).unwrap();
        let counts: Vec<u32> = (0..8)
            .map(|y| (0..100).map(|x| pix.get_pixel_unchecked(x, y)).sum())
            .collect();
        assert_eq!(counts, vec![0, 0, 1, 1, 1, 0, 1, 1]);
    }

    #[test]
    fn test_gray_and_rgb_bands() {
        let gray = gray_bands(8, 4, &[1..2]).unwrap();
        assert_eq!(gray.get_pixel(4, 1), Some(0));
        assert_eq!(gray.get_pixel(4, 0), Some(255));

        let rgb = rgb_bands(8, 4, &[3..4], (10, 20, 30)).unwrap();
        assert_eq!(rgb.get_rgb(4, 3), Some((10, 20, 30)));
        assert_eq!(rgb.get_rgb(4, 2), Some((255, 255, 255)));
    }

    #[test]
    fn test_tiny_width_still_inked() {
        let pix = binary_bands(1, 3, &[1..2]).unwrap();
        assert_eq!(pix.get_pixel(0, 1), Some(1));
    }
}
