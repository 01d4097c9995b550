//! Image format regression test
//!
//! Writes synthetic band images in every supported format, reads them
//! back through format detection, and checks the pixels survive.
//!
//! Run with:
//! ```
//! cargo test -p bandcut-io --test ioformats_reg
//! ```

use bandcut_core::{ImageFormat, PixelDepth};
use bandcut_io::{detect_format, read_image, write_image};
use bandcut_test::{RegParams, synthetic};

#[test]
fn ioformats_reg() {
    let mut rp = RegParams::new("ioformats");
    let dir = tempfile::tempdir().expect("tempdir");

    let binary = synthetic::binary_bands(70, 40, &[5..12, 25..33]).expect("fixture");
    let gray = synthetic::gray_bands(70, 40, &[5..12, 25..33]).expect("fixture");
    let rgb = synthetic::rgb_bands(70, 40, &[5..12], (200, 30, 60)).expect("fixture");

    // Lossless formats keep every pixel and the depth
    for (pix, name) in [(&binary, "binary"), (&gray, "gray"), (&rgb, "rgb")] {
        for format in [ImageFormat::Png, ImageFormat::Pnm] {
            let path = dir
                .path()
                .join(format!("{}.{}", name, format.extension()));
            write_image(pix, &path, format).expect("write");
            rp.compare_values(
                1.0,
                if detect_format(&path).expect("detect") == format {
                    1.0
                } else {
                    0.0
                },
                0.0,
            );
            let back = read_image(&path).expect("read");
            rp.compare_pix(pix, &back);
        }
    }

    // Unknown format follows the extension
    let path = dir.path().join("inferred.pgm");
    write_image(&gray, &path, ImageFormat::Unknown).expect("write");
    let back = read_image(&path).expect("read");
    rp.compare_values(
        1.0,
        if back.informat() == ImageFormat::Pnm {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    // JPEG is lossy; check size and that ink rows stay dark
    let path = dir.path().join("gray.jpg");
    write_image(&gray, &path, ImageFormat::Jpeg).expect("write");
    let back = read_image(&path).expect("read");
    rp.compare_values(70.0, back.width() as f64, 0.0);
    rp.compare_values(40.0, back.height() as f64, 0.0);
    rp.compare_values(8.0, back.depth().bits() as f64, 0.0);
    rp.compare_values(0.0, back.get_pixel(35, 8).unwrap_or(255) as f64, 40.0);
    rp.compare_values(255.0, back.get_pixel(35, 18).unwrap_or(0) as f64, 40.0);

    // Missing files fail
    assert!(read_image(dir.path().join("missing.png")).is_err());
    assert_eq!(binary.depth(), PixelDepth::Bit1);

    assert!(rp.cleanup(), "ioformats regression test failed");
}
