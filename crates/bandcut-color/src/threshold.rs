//! Binary thresholding
//!
//! Converts 8 bpp grayscale to 1 bpp with dark pixels as foreground:
//! a pixel at or below the threshold becomes 1 (ink), anything brighter
//! becomes 0 (background).
//!
//! - Fixed threshold binarization
//! - Otsu's method (automatic threshold selection)

use crate::{ColorError, ColorResult};
use bandcut_core::{Pix, PixMut, PixelDepth};

/// Convert a grayscale image to binary using a fixed threshold
///
/// Pixels `<= threshold` become foreground (1), brighter pixels background (0).
pub fn threshold_to_binary(pix: &Pix, threshold: u8) -> ColorResult<Pix> {
    check_gray(pix)?;

    let (w, h) = (pix.width(), pix.height());
    let t = u32::from(threshold);
    let mut out = PixMut::new(w, h, PixelDepth::Bit1)?;
    out.set_resolution(pix.xres(), pix.yres());
    for y in 0..h {
        for x in 0..w {
            if pix.get_pixel_unchecked(x, y) <= t {
                out.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    Ok(out.into())
}

/// Compute Otsu's threshold for a grayscale image
///
/// Returns the level `t` that maximizes the between-class variance of
/// `[0, t]` versus `(t, 255]`.
pub fn compute_otsu_threshold(pix: &Pix) -> ColorResult<u8> {
    check_gray(pix)?;

    let mut hist = [0u32; 256];
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            hist[pix.get_pixel_unchecked(x, y) as usize] += 1;
        }
    }
    Ok(otsu_threshold_from_histogram(&hist))
}

/// Otsu's threshold from a 256-bin histogram
///
/// A single-valued histogram has no split and returns 0, so a uniform
/// image thresholds to all background unless it is pure black.
pub fn otsu_threshold_from_histogram(hist: &[u32; 256]) -> u8 {
    let total: f64 = hist.iter().map(|&h| f64::from(h)).sum();
    let sum_total: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &h)| i as f64 * f64::from(h))
        .sum();

    let mut sum_b = 0f64;
    let mut w_b = 0f64;
    let mut best_var = 0f64;
    let mut best_t = 0u8;

    for (t, &h) in hist.iter().enumerate() {
        w_b += f64::from(h);
        if w_b < 1.0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f < 1.0 {
            break;
        }

        sum_b += t as f64 * f64::from(h);
        let m_b = sum_b / w_b;
        let m_f = (sum_total - sum_b) / w_f;

        let var_between = w_b * w_f * (m_b - m_f) * (m_b - m_f);
        if var_between > best_var {
            best_var = var_between;
            best_t = t as u8;
        }
    }

    best_t
}

fn check_gray(pix: &Pix) -> ColorResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(ColorError::UnsupportedDepth {
            expected: "8-bpp grayscale",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}
