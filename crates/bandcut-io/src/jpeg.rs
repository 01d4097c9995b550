//! JPEG image format support
//!
//! Reads with `jpeg-decoder` and writes with `jpeg-encoder`.
//! Grayscale JPEGs decode to 8 bpp, color JPEGs to 32 bpp RGB.
//! Images that are neither 8 nor 32 bpp are converted to 8 bpp gray
//! before encoding.

use crate::{IoError, IoResult};
use bandcut_core::{ImageFormat, Pix, PixMut, PixelDepth, color};
use jpeg_decoder::{Decoder, PixelFormat};
use std::io::{Read, Write};

/// Default JPEG quality used by [`crate::write_image`].
pub const DEFAULT_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
///
/// # Returns
/// A `Pix` at 8 bpp (grayscale) or 32 bpp (RGB / CMYK).
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);
    let npix = width as usize * height as usize;

    let mut pix = match info.pixel_format {
        PixelFormat::L8 => {
            let mut pm = PixMut::new(width, height, PixelDepth::Bit8)?;
            for (i, &v) in pixels.iter().take(npix).enumerate() {
                let (x, y) = (i as u32 % width, i as u32 / width);
                pm.set_pixel_unchecked(x, y, u32::from(v));
            }
            pm
        }
        PixelFormat::L16 => {
            let mut pm = PixMut::new(width, height, PixelDepth::Bit8)?;
            for (i, v) in pixels.chunks_exact(2).take(npix).enumerate() {
                let (x, y) = (i as u32 % width, i as u32 / width);
                pm.set_pixel_unchecked(x, y, u32::from(v[0]));
            }
            pm
        }
        PixelFormat::RGB24 => {
            let mut pm = PixMut::new(width, height, PixelDepth::Bit32)?;
            for (i, v) in pixels.chunks_exact(3).take(npix).enumerate() {
                let (x, y) = (i as u32 % width, i as u32 / width);
                pm.set_pixel_unchecked(x, y, color::compose_rgb(v[0], v[1], v[2]));
            }
            pm
        }
        PixelFormat::CMYK32 => {
            let mut pm = PixMut::new(width, height, PixelDepth::Bit32)?;
            for (i, v) in pixels.chunks_exact(4).take(npix).enumerate() {
                let (x, y) = (i as u32 % width, i as u32 / width);
                let k = u32::from(v[3]);
                let channel = |c: u8| ((255 - u32::from(c)) * (255 - k) / 255) as u8;
                let pixel = color::compose_rgb(channel(v[0]), channel(v[1]), channel(v[2]));
                pm.set_pixel_unchecked(x, y, pixel);
            }
            pm
        }
        #[allow(unreachable_patterns)]
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "JPEG pixel format {:?}",
                other
            )));
        }
    };

    pix.set_informat(ImageFormat::Jpeg);
    Ok(pix.into())
}

/// Write a `Pix` as baseline JPEG.
///
/// # Errors
///
/// Returns [`IoError::EncodeError`] if either dimension exceeds 65535.
pub fn write_jpeg<W: Write>(pix: &Pix, mut writer: W, quality: u8) -> IoResult<()> {
    let width = u16::try_from(pix.width())
        .map_err(|_| IoError::EncodeError(format!("JPEG width {} too large", pix.width())))?;
    let height = u16::try_from(pix.height())
        .map_err(|_| IoError::EncodeError(format!("JPEG height {} too large", pix.height())))?;

    let (bytes, color_type) = if pix.depth() == PixelDepth::Bit32 {
        let mut bytes = Vec::with_capacity(pix.width() as usize * pix.height() as usize * 3);
        for y in 0..pix.height() {
            for x in 0..pix.width() {
                let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
                bytes.extend_from_slice(&[r, g, b]);
            }
        }
        (bytes, jpeg_encoder::ColorType::Rgb)
    } else {
        let gray = pix.convert_to_8()?;
        let mut bytes = Vec::with_capacity(gray.width() as usize * gray.height() as usize);
        for y in 0..gray.height() {
            for x in 0..gray.width() {
                bytes.push(gray.get_pixel_unchecked(x, y) as u8);
            }
        }
        (bytes, jpeg_encoder::ColorType::Luma)
    };

    let mut jpeg_buf = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut jpeg_buf, quality);
    encoder
        .encode(&bytes, width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;
    writer.write_all(&jpeg_buf)?;
    Ok(())
}
