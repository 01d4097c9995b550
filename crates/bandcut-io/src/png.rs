//! PNG image format support
//!
//! 1 bpp images use the bandcut convention (1 = foreground ink) in memory
//! and the PNG convention (0 = black) on disk, so bits are inverted in
//! both directions. Palette images are expanded to 32 bpp RGB on read.

use crate::{IoError, IoResult};
use bandcut_core::{ImageFormat, Pix, PixMut, PixelDepth, color};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;
    let palette: Option<Vec<u8>> = info.palette.as_ref().map(|p| p.to_vec());

    let (pix_depth, spp) = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::One) => (PixelDepth::Bit1, 1),
        (ColorType::Grayscale, BitDepth::Two) => (PixelDepth::Bit2, 1),
        (ColorType::Grayscale, BitDepth::Four) => (PixelDepth::Bit4, 1),
        (ColorType::Grayscale, BitDepth::Eight) => (PixelDepth::Bit8, 1),
        (ColorType::Grayscale, BitDepth::Sixteen) => (PixelDepth::Bit16, 1),
        (ColorType::GrayscaleAlpha, _) => (PixelDepth::Bit32, 4),
        (ColorType::Rgb, _) => (PixelDepth::Bit32, 3),
        (ColorType::Rgba, _) => (PixelDepth::Bit32, 4),
        (ColorType::Indexed, _) => (PixelDepth::Bit32, 3),
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let mut pix_mut = PixMut::new(width, height, pix_depth)?;
    pix_mut.set_spp(spp);
    pix_mut.set_informat(ImageFormat::Png);

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::One) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let byte_idx = row_start + (x / 8) as usize;
                    let bit_idx = 7 - (x % 8);
                    let val = (data[byte_idx] >> bit_idx) & 1;
                    pix_mut.set_pixel_unchecked(x, y, 1 - val as u32);
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Two) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let byte_idx = row_start + (x / 4) as usize;
                    let shift = 6 - ((x % 4) * 2);
                    let val = (data[byte_idx] >> shift) & 3;
                    pix_mut.set_pixel_unchecked(x, y, val as u32);
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Four) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let byte_idx = row_start + (x / 2) as usize;
                    let val = if x % 2 == 0 {
                        (data[byte_idx] >> 4) & 0xF
                    } else {
                        data[byte_idx] & 0xF
                    };
                    pix_mut.set_pixel_unchecked(x, y, val as u32);
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Eight) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let val = data[row_start + x as usize];
                    pix_mut.set_pixel_unchecked(x, y, val as u32);
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Sixteen) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + (x as usize * 2);
                    let val = ((data[idx] as u32) << 8) | (data[idx + 1] as u32);
                    pix_mut.set_pixel_unchecked(x, y, val);
                }
            }
        }
        (ColorType::GrayscaleAlpha, _) => {
            let samples = if bit_depth == BitDepth::Sixteen { 4 } else { 2 };
            let alpha_offset = samples / 2;
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + (x as usize * samples);
                    let (g, a) = (data[idx], data[idx + alpha_offset]);
                    pix_mut.set_pixel_unchecked(x, y, color::compose_rgba(g, g, g, a));
                }
            }
        }
        (ColorType::Rgb, _) | (ColorType::Rgba, _) => {
            let channels = if color_type == ColorType::Rgba { 4 } else { 3 };
            let step = if bit_depth == BitDepth::Sixteen { 2 } else { 1 };
            let samples = channels * step;
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + (x as usize * samples);
                    let r = data[idx];
                    let g = data[idx + step];
                    let b = data[idx + 2 * step];
                    let a = if channels == 4 {
                        data[idx + 3 * step]
                    } else {
                        255
                    };
                    pix_mut.set_pixel_unchecked(x, y, color::compose_rgba(r, g, b, a));
                }
            }
        }
        (ColorType::Indexed, _) => {
            let palette = palette
                .ok_or_else(|| IoError::InvalidData("indexed PNG without palette".to_string()))?;
            let bits = bit_depth as u32;
            let per_byte = 8 / bits;
            let mask = ((1u32 << bits) - 1) as u8;
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let byte = data[row_start + (x / per_byte) as usize];
                    let shift = 8 - bits * (x % per_byte + 1);
                    let index = ((byte >> shift) & mask) as usize * 3;
                    let rgb = palette.get(index..index + 3).ok_or_else(|| {
                        IoError::InvalidData(format!("palette index {} out of range", index / 3))
                    })?;
                    pix_mut.set_pixel_unchecked(x, y, color::compose_rgb(rgb[0], rgb[1], rgb[2]));
                }
            }
        }
    }

    Ok(pix_mut.into())
}

/// Write a PNG image
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, bit_depth) = match pix.depth() {
        PixelDepth::Bit1 => (ColorType::Grayscale, BitDepth::One),
        PixelDepth::Bit2 => (ColorType::Grayscale, BitDepth::Two),
        PixelDepth::Bit4 => (ColorType::Grayscale, BitDepth::Four),
        PixelDepth::Bit8 => (ColorType::Grayscale, BitDepth::Eight),
        PixelDepth::Bit16 => (ColorType::Grayscale, BitDepth::Sixteen),
        PixelDepth::Bit32 => {
            if pix.spp() == 4 {
                (ColorType::Rgba, BitDepth::Eight)
            } else {
                (ColorType::Rgb, BitDepth::Eight)
            }
        }
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let bytes_per_row = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::One) => width.div_ceil(8),
        (ColorType::Grayscale, BitDepth::Two) => width.div_ceil(4),
        (ColorType::Grayscale, BitDepth::Four) => width.div_ceil(2),
        (ColorType::Grayscale, BitDepth::Sixteen) => width * 2,
        (ColorType::Rgb, _) => width * 3,
        (ColorType::Rgba, _) => width * 4,
        _ => width,
    } as usize;

    let mut data = vec![0u8; bytes_per_row * height as usize];

    for y in 0..height {
        let row_start = y as usize * bytes_per_row;

        match pix.depth() {
            PixelDepth::Bit1 => {
                for x in 0..width {
                    if pix.get_pixel_unchecked(x, y) == 0 {
                        let byte_idx = row_start + (x / 8) as usize;
                        data[byte_idx] |= 1 << (7 - (x % 8));
                    }
                }
            }
            PixelDepth::Bit2 => {
                for x in 0..width {
                    let val = pix.get_pixel_unchecked(x, y);
                    let byte_idx = row_start + (x / 4) as usize;
                    let shift = 6 - ((x % 4) * 2);
                    data[byte_idx] |= ((val & 3) as u8) << shift;
                }
            }
            PixelDepth::Bit4 => {
                for x in 0..width {
                    let val = pix.get_pixel_unchecked(x, y);
                    let byte_idx = row_start + (x / 2) as usize;
                    if x % 2 == 0 {
                        data[byte_idx] |= ((val & 0xF) as u8) << 4;
                    } else {
                        data[byte_idx] |= (val & 0xF) as u8;
                    }
                }
            }
            PixelDepth::Bit8 => {
                for x in 0..width {
                    data[row_start + x as usize] = pix.get_pixel_unchecked(x, y) as u8;
                }
            }
            PixelDepth::Bit16 => {
                for x in 0..width {
                    let val = pix.get_pixel_unchecked(x, y);
                    let idx = row_start + (x as usize * 2);
                    data[idx] = (val >> 8) as u8;
                    data[idx + 1] = val as u8;
                }
            }
            PixelDepth::Bit32 => {
                let channels = if color_type == ColorType::Rgba { 4 } else { 3 };
                for x in 0..width {
                    let (r, g, b, a) = color::extract_rgba(pix.get_pixel_unchecked(x, y));
                    let idx = row_start + (x as usize * channels);
                    data[idx] = r;
                    data[idx + 1] = g;
                    data[idx + 2] = b;
                    if channels == 4 {
                        data[idx + 3] = a;
                    }
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
