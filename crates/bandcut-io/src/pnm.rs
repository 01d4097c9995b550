//! PNM (Portable Any Map) format support
//!
//! Reads and writes PBM (P4 binary), PGM (P5 binary), and
//! PPM (P6 binary) formats. ASCII variants (P1/P2/P3) and
//! PAM (P7) are not supported.
//!
//! PBM already uses 1 = black, which is the bandcut ink convention,
//! so 1 bpp data is stored without inversion.

use crate::{IoError, IoResult};
use bandcut_core::{ImageFormat, Pix, PixMut, PixelDepth, color};
use std::io::{BufRead, Read, Write};

/// Header fields of a binary PNM file.
struct PnmHeader {
    kind: u8,
    width: u32,
    height: u32,
    maxval: u32,
}

/// Read one whitespace-delimited header token, skipping `#` comments.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = String::new();
    let mut in_comment = false;
    loop {
        let mut byte = [0u8; 1];
        if reader.read(&mut byte)? == 0 {
            break;
        }
        let c = byte[0];
        if in_comment {
            in_comment = c != b'\n' && c != b'\r';
            continue;
        }
        if c == b'#' {
            in_comment = true;
            continue;
        }
        if c.is_ascii_whitespace() {
            if token.is_empty() {
                continue;
            }
            break;
        }
        token.push(c as char);
    }
    if token.is_empty() {
        return Err(IoError::InvalidData("truncated PNM header".to_string()));
    }
    Ok(token)
}

fn read_number<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse()
        .map_err(|_| IoError::InvalidData(format!("invalid PNM {}: {:?}", what, token)))
}

fn read_header<R: BufRead>(reader: &mut R) -> IoResult<PnmHeader> {
    let magic = read_token(reader)?;
    let kind = match magic.as_str() {
        "P4" => 4,
        "P5" => 5,
        "P6" => 6,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM variant {} not supported",
                other
            )));
        }
    };
    let width = read_number(reader, "width")?;
    let height = read_number(reader, "height")?;
    let maxval = if kind == 4 {
        1
    } else {
        read_number(reader, "maxval")?
    };
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("invalid PNM maxval {}", maxval)));
    }
    Ok(PnmHeader {
        kind,
        width,
        height,
        maxval,
    })
}

/// Bytes of raster data the header declares.
fn raster_len(header: &PnmHeader) -> IoResult<u64> {
    let (w, h) = (u64::from(header.width), u64::from(header.height));
    let sample_bytes = if header.maxval > 255 { 2 } else { 1 };
    let row_bytes = match header.kind {
        4 => w.div_ceil(8),
        5 => w * sample_bytes,
        _ => w * 3 * sample_bytes,
    };
    row_bytes
        .checked_mul(h)
        .ok_or_else(|| IoError::InvalidData(format!("PNM size {}x{} overflows", w, h)))
}

/// Scale a sample in `0..=maxval` to `0..=255`, rounding to nearest.
#[inline]
fn scale_to_8(val: u32, maxval: u32) -> u8 {
    if maxval == 255 {
        return val.min(255) as u8;
    }
    ((val.min(maxval) * 255 + maxval / 2) / maxval) as u8
}

/// Read a PNM image (P4/P5/P6) from a reader.
///
/// The raster is read in full before the image is allocated, so a header
/// that claims more pixels than the stream holds fails with
/// [`IoError::InvalidData`].
///
/// # Returns
/// A `Pix` at 1 bpp (PBM), 8 or 16 bpp (PGM), or 32 bpp (PPM).
/// 8-bit samples with a maxval below 255 are rescaled to `0..=255`.
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Pix> {
    let header = read_header(&mut reader)?;
    let (w, h) = (header.width, header.height);
    let maxval = header.maxval;
    let wide = maxval > 255;

    let needed = raster_len(&header)?;
    let mut body = Vec::new();
    reader.by_ref().take(needed).read_to_end(&mut body)?;
    if (body.len() as u64) < needed {
        return Err(IoError::InvalidData(format!(
            "PNM raster truncated: header declares {}x{} ({} bytes), found {}",
            w,
            h,
            needed,
            body.len()
        )));
    }

    let sample = |i: usize| -> u32 {
        if wide {
            (u32::from(body[i]) << 8) | u32::from(body[i + 1])
        } else {
            u32::from(body[i])
        }
    };
    let bps = if wide { 2 } else { 1 };

    let mut pm = match header.kind {
        4 => {
            let row_bytes = w.div_ceil(8) as usize;
            let mut pm = PixMut::new(w, h, PixelDepth::Bit1)?;
            for (y, row) in body.chunks_exact(row_bytes).enumerate() {
                for x in 0..w {
                    let bit = (row[(x / 8) as usize] >> (7 - (x % 8))) & 1;
                    pm.set_pixel_unchecked(x, y as u32, u32::from(bit));
                }
            }
            pm
        }
        5 => {
            let depth = if wide {
                PixelDepth::Bit16
            } else {
                PixelDepth::Bit8
            };
            let mut pm = PixMut::new(w, h, depth)?;
            let row_bytes = w as usize * bps;
            for y in 0..h {
                let start = y as usize * row_bytes;
                for x in 0..w {
                    let val = sample(start + x as usize * bps);
                    let val = if wide {
                        val
                    } else {
                        u32::from(scale_to_8(val, maxval))
                    };
                    pm.set_pixel_unchecked(x, y, val);
                }
            }
            pm
        }
        _ => {
            let mut pm = PixMut::new(w, h, PixelDepth::Bit32)?;
            let row_bytes = w as usize * 3 * bps;
            for y in 0..h {
                let start = y as usize * row_bytes;
                for x in 0..w {
                    let i = start + x as usize * 3 * bps;
                    let pixel = color::compose_rgb(
                        scale_to_8(sample(i), maxval),
                        scale_to_8(sample(i + bps), maxval),
                        scale_to_8(sample(i + 2 * bps), maxval),
                    );
                    pm.set_pixel_unchecked(x, y, pixel);
                }
            }
            pm
        }
    };

    pm.set_informat(ImageFormat::Pnm);
    Ok(pm.into())
}

/// Write a `Pix` as binary PNM to a writer.
///
/// Chooses P4 (1 bpp), P5 (2/4/8/16 bpp grayscale), or P6 (32 bpp RGB)
/// based on the pixel depth. Alpha is dropped.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let w = pix.width();
    let h = pix.height();

    match pix.depth() {
        PixelDepth::Bit1 => {
            write!(writer, "P4\n{} {}\n", w, h)?;
            let mut row = vec![0u8; w.div_ceil(8) as usize];
            for y in 0..h {
                row.fill(0);
                for x in 0..w {
                    if pix.get_pixel_unchecked(x, y) != 0 {
                        row[(x / 8) as usize] |= 1 << (7 - (x % 8));
                    }
                }
                writer.write_all(&row)?;
            }
        }
        PixelDepth::Bit16 => {
            write!(writer, "P5\n{} {}\n65535\n", w, h)?;
            for y in 0..h {
                for x in 0..w {
                    let val = pix.get_pixel_unchecked(x, y) as u16;
                    writer.write_all(&val.to_be_bytes())?;
                }
            }
        }
        PixelDepth::Bit32 => {
            write!(writer, "P6\n{} {}\n255\n", w, h)?;
            let mut row = Vec::with_capacity(w as usize * 3);
            for y in 0..h {
                row.clear();
                for x in 0..w {
                    let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
                    row.extend_from_slice(&[r, g, b]);
                }
                writer.write_all(&row)?;
            }
        }
        PixelDepth::Bit2 | PixelDepth::Bit4 | PixelDepth::Bit8 => {
            let gray = pix.convert_to_8()?;
            write!(writer, "P5\n{} {}\n255\n", w, h)?;
            let mut row = vec![0u8; w as usize];
            for y in 0..h {
                for x in 0..w {
                    row[x as usize] = gray.get_pixel_unchecked(x, y) as u8;
                }
                writer.write_all(&row)?;
            }
        }
    }

    Ok(())
}
