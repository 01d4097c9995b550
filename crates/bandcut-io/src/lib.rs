//! bandcut-io - Image I/O for bandcut
//!
//! Supported formats (behind cargo features):
//!
//! - PNG (`png-format`)
//! - JPEG (`jpeg`)
//! - PNM: PBM/PGM/PPM binary variants (`pnm`)
//!
//! Formats are detected from magic bytes on read. On write, an
//! [`ImageFormat::Unknown`] request is resolved from the file extension,
//! falling back to PNG.

pub mod error;
pub mod format;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use bandcut_core::ImageFormat;
pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};

use bandcut_core::Pix;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path.
///
/// The format is detected from the file's magic bytes, not its extension.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let data = std::fs::read(path.as_ref())?;
    read_image_mem(&data)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    let cursor = Cursor::new(data);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(cursor),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(cursor),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(cursor),
        ImageFormat::Unknown => Err(IoError::UnsupportedFormat(
            "unrecognized image data".to_string(),
        )),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Resolve the format to write, inferring from the path for `Unknown`.
pub fn resolve_output_format<P: AsRef<Path>>(path: P, format: ImageFormat) -> ImageFormat {
    if format != ImageFormat::Unknown {
        return format;
    }
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(ImageFormat::from_extension)
        .filter(|f| *f != ImageFormat::Unknown)
        .unwrap_or(ImageFormat::Png)
}

/// Write an image to a file path.
///
/// # Arguments
///
/// * `pix` - Image to write
/// * `path` - Destination file; created or truncated
/// * `format` - Output format, or `Unknown` to infer from the extension
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let format = resolve_output_format(path.as_ref(), format);
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_image_to(pix, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

fn write_image_to<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(pix, writer, jpeg::DEFAULT_QUALITY),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(pix, writer),
        other => Err(IoError::UnsupportedFormat(format!(
            "cannot write {:?}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandcut_core::{PixMut, PixelDepth};

    #[test]
    fn test_resolve_output_format() {
        assert_eq!(
            resolve_output_format("a/b.jpg", ImageFormat::Unknown),
            ImageFormat::Jpeg
        );
        assert_eq!(
            resolve_output_format("a/b", ImageFormat::Unknown),
            ImageFormat::Png
        );
        assert_eq!(
            resolve_output_format("a/b.xyz", ImageFormat::Unknown),
            ImageFormat::Png
        );
        assert_eq!(
            resolve_output_format("a/b.png", ImageFormat::Pnm),
            ImageFormat::Pnm
        );
    }

    #[test]
    #[cfg(feature = "png-format")]
    fn test_mem_roundtrip_png() {
        let mut pm = PixMut::new(5, 3, PixelDepth::Bit8).unwrap();
        pm.set_pixel(4, 2, 77).unwrap();
        let pix: Pix = pm.into();

        let mut bytes = Vec::new();
        png::write_png(&pix, &mut bytes).unwrap();
        let back = read_image_mem(&bytes).unwrap();
        assert_eq!(back.informat(), ImageFormat::Png);
        assert_eq!(back.get_pixel(4, 2), Some(77));
    }

    #[test]
    fn test_read_unrecognized() {
        assert!(matches!(
            read_image_mem(b"hello world"),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
