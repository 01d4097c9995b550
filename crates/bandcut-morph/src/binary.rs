//! Binary morphological operations
//!
//! Implements erosion, dilation, and closing for 1-bpp images.
//! All operations work on whole 32-bit words: each SEL hit shifts a source
//! row and ORs (dilation) or ANDs (erosion) it into the destination row.
//!
//! Pixels outside the image are treated as background, so erosion eats
//! foreground touching the border. [`close_safe_brick`] pads first to avoid
//! that.

use crate::{MorphError, MorphResult, Sel};
use bandcut_core::pix::last_word_mask;
use bandcut_core::{Pix, PixMut, PixelDepth};

/// Dilate a binary image
///
/// Dilation expands foreground regions. For each hit offset (dx, dy) in
/// the SEL, the source is translated by that offset and OR-accumulated
/// into the output: `dst(x, y) |= src(x - dx, y - dy)`.
pub fn dilate(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pix)?;

    let h = pix.height() as i32;
    let wpl = pix.wpl() as usize;
    let src = clean_words(pix);
    let mut out = PixMut::new_like(pix)?;
    let dst = out.data_mut();

    for (dx, dy) in sel.hit_offsets() {
        for y in 0..h {
            let src_y = y - dy;
            if src_y < 0 || src_y >= h {
                continue;
            }
            let s = src_y as usize * wpl;
            let d = y as usize * wpl;
            shift_or_row(&mut dst[d..d + wpl], &src[s..s + wpl], dx);
        }
    }

    clear_unused_bits(out.data_mut(), pix.width(), wpl);
    Ok(out.into())
}

/// Erode a binary image
///
/// Erosion shrinks foreground regions. A pixel stays set only if every hit
/// offset lands on foreground: `dst(x, y) &= src(x + dx, y + dy)`.
/// Offsets that leave the image clear the pixel.
pub fn erode(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pix)?;

    let h = pix.height() as i32;
    let wpl = pix.wpl() as usize;
    let src = clean_words(pix);
    let mut out = PixMut::new_like(pix)?;
    let dst = out.data_mut();
    dst.fill(0xFFFF_FFFF);

    for (dx, dy) in sel.hit_offsets() {
        for y in 0..h {
            let src_y = y + dy;
            let d = y as usize * wpl;
            if src_y < 0 || src_y >= h {
                dst[d..d + wpl].fill(0);
                continue;
            }
            let s = src_y as usize * wpl;
            shift_and_row(&mut dst[d..d + wpl], &src[s..s + wpl], -dx);
        }
    }

    clear_unused_bits(out.data_mut(), pix.width(), wpl);
    Ok(out.into())
}

/// Close a binary image
///
/// Closing = Dilation followed by Erosion.
/// Fills small holes and connects nearby objects.
pub fn close(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let dilated = dilate(pix, sel)?;
    erode(&dilated, sel)
}

/// Dilate with a brick (rectangular) structuring element
///
/// Separable: a horizontal line pass followed by a vertical line pass,
/// which costs `width + height` row shifts instead of `width * height`.
pub fn dilate_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    check_binary(pix)?;
    let mut result = pix.clone();
    if width > 1 {
        result = dilate(&result, &Sel::create_horizontal(width)?)?;
    }
    if height > 1 {
        result = dilate(&result, &Sel::create_vertical(height)?)?;
    }
    Ok(result)
}

/// Erode with a brick (rectangular) structuring element
///
/// Separable, like [`dilate_brick`].
pub fn erode_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    check_binary(pix)?;
    let mut result = pix.clone();
    if width > 1 {
        result = erode(&result, &Sel::create_horizontal(width)?)?;
    }
    if height > 1 {
        result = erode(&result, &Sel::create_vertical(height)?)?;
    }
    Ok(result)
}

/// Close with a brick structuring element
pub fn close_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    let dilated = dilate_brick(pix, width, height)?;
    erode_brick(&dilated, width, height)
}

/// Close a binary image safely using a brick structuring element.
///
/// Pads the image by the SEL half-extent (horizontal padding rounded up to
/// a 32-bit word boundary) before closing, then strips the border. Without
/// the padding, foreground within half a brick of the edge would be eroded
/// away by the out-of-image background.
///
/// # Arguments
/// * `pix` - 1 bpp input image
/// * `hsize` - Horizontal size of the brick
/// * `vsize` - Vertical size of the brick
pub fn close_safe_brick(pix: &Pix, hsize: u32, vsize: u32) -> MorphResult<Pix> {
    check_binary(pix)?;
    if hsize <= 1 && vsize <= 1 {
        return Ok(pix.clone());
    }
    let xbord = (hsize / 2).div_ceil(32) * 32;
    let ybord = vsize / 2;
    let padded = add_border(pix, xbord, ybord)?;
    let closed = close_brick(&padded, hsize, vsize)?;
    remove_border(&closed, xbord, ybord, pix.width(), pix.height())
}

/// Copy of the image words with the padding bits of each row cleared.
fn clean_words(pix: &Pix) -> Vec<u32> {
    let mut words = pix.data().to_vec();
    clear_unused_bits(&mut words, pix.width(), pix.wpl() as usize);
    words
}

/// Shift src row by `shift` pixels and OR into dst (word-level).
///
/// Positive `shift` moves pixels right (toward higher x), negative moves
/// them left. Bits shifted past either end are dropped.
#[allow(clippy::needless_range_loop)]
fn shift_or_row(dst: &mut [u32], src: &[u32], shift: i32) {
    let wpl = dst.len();

    if shift == 0 {
        for i in 0..wpl {
            dst[i] |= src[i];
        }
        return;
    }

    let abs_shift = shift.unsigned_abs() as usize;
    let word_shift = abs_shift / 32;
    let bit_shift = (abs_shift % 32) as u32;

    if word_shift >= wpl {
        return;
    }

    if shift > 0 {
        if bit_shift == 0 {
            for i in word_shift..wpl {
                dst[i] |= src[i - word_shift];
            }
        } else {
            dst[word_shift] |= src[0] >> bit_shift;
            for i in (word_shift + 1)..wpl {
                let si = i - word_shift;
                dst[i] |= (src[si] >> bit_shift) | (src[si - 1] << (32 - bit_shift));
            }
        }
    } else {
        let end = wpl - word_shift;
        if bit_shift == 0 {
            for i in 0..end {
                dst[i] |= src[i + word_shift];
            }
        } else {
            for i in 0..end - 1 {
                let si = i + word_shift;
                dst[i] |= (src[si] << bit_shift) | (src[si + 1] >> (32 - bit_shift));
            }
            dst[end - 1] |= src[wpl - 1] << bit_shift;
        }
    }
}

/// Shift src row by `shift` pixels and AND into dst (word-level).
///
/// Same shift semantics as `shift_or_row`. Positions with no source pixel
/// read as 0, so they clear dst.
#[allow(clippy::needless_range_loop)]
fn shift_and_row(dst: &mut [u32], src: &[u32], shift: i32) {
    let wpl = dst.len();

    if shift == 0 {
        for i in 0..wpl {
            dst[i] &= src[i];
        }
        return;
    }

    let abs_shift = shift.unsigned_abs() as usize;
    let word_shift = abs_shift / 32;
    let bit_shift = (abs_shift % 32) as u32;

    if word_shift >= wpl {
        dst.fill(0);
        return;
    }

    if shift > 0 {
        dst[..word_shift].fill(0);
        if bit_shift == 0 {
            for i in word_shift..wpl {
                dst[i] &= src[i - word_shift];
            }
        } else {
            dst[word_shift] &= src[0] >> bit_shift;
            for i in (word_shift + 1)..wpl {
                let si = i - word_shift;
                dst[i] &= (src[si] >> bit_shift) | (src[si - 1] << (32 - bit_shift));
            }
        }
    } else {
        let end = wpl - word_shift;
        if bit_shift == 0 {
            for i in 0..end {
                dst[i] &= src[i + word_shift];
            }
        } else {
            for i in 0..end - 1 {
                let si = i + word_shift;
                dst[i] &= (src[si] << bit_shift) | (src[si + 1] >> (32 - bit_shift));
            }
            dst[end - 1] &= src[wpl - 1] << bit_shift;
        }
        dst[end..].fill(0);
    }
}

/// Clear the padding bits in the last word of each row.
///
/// Right shifts push foreground into the padding; left shifts would pull it
/// back into the image on the next operation.
fn clear_unused_bits(data: &mut [u32], width: u32, wpl: usize) {
    let mask = last_word_mask(width, PixelDepth::Bit1);
    if mask == !0 {
        return;
    }
    for row in data.chunks_exact_mut(wpl) {
        row[wpl - 1] &= mask;
    }
}

/// Add a background border around a binary image.
///
/// `xbord` must be a multiple of 32 so rows copy word-aligned.
fn add_border(pix: &Pix, xbord: u32, ybord: u32) -> MorphResult<Pix> {
    debug_assert!(
        xbord.is_multiple_of(32),
        "horizontal border must be word-aligned"
    );

    let mut out = PixMut::new(
        pix.width() + 2 * xbord,
        pix.height() + 2 * ybord,
        PixelDepth::Bit1,
    )?;

    let left_words = (xbord / 32) as usize;
    let src = clean_words(pix);
    let src_wpl = pix.wpl() as usize;
    for (y, row) in src.chunks_exact(src_wpl).enumerate() {
        let dst_row = out.row_data_mut(y as u32 + ybord);
        dst_row[left_words..left_words + src_wpl].copy_from_slice(row);
    }

    Ok(out.into())
}

/// Extract the `width` x `height` region at (`xbord`, `ybord`).
///
/// `xbord` must be a multiple of 32.
fn remove_border(pix: &Pix, xbord: u32, ybord: u32, width: u32, height: u32) -> MorphResult<Pix> {
    let mut out = PixMut::new(width, height, PixelDepth::Bit1)?;

    let left_words = (xbord / 32) as usize;
    let dst_wpl = out.wpl() as usize;
    for y in 0..height {
        let src_row = pix.row_data(y + ybord);
        out.row_data_mut(y)
            .copy_from_slice(&src_row[left_words..left_words + dst_wpl]);
    }

    clear_unused_bits(out.data_mut(), width, dst_wpl);
    Ok(out.into())
}

/// Check that the image is binary (1-bpp)
fn check_binary(pix: &Pix) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(MorphError::UnsupportedDepth {
            expected: "1-bpp binary",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}
