//! PNM I/O regression test
//!
//! Reads hand-built PBM/PGM/PPM buffers through format detection and
//! checks malformed headers come back as errors rather than huge
//! allocations.
//!
//! Run with:
//! ```
//! cargo test -p bandcut-io --test pnmio_reg
//! ```

use bandcut_core::PixelDepth;
use bandcut_io::{IoError, read_image_mem};
use bandcut_test::RegParams;

fn is_invalid_data<T>(result: &Result<T, IoError>) -> f64 {
    if matches!(result, Err(IoError::InvalidData(_))) {
        1.0
    } else {
        0.0
    }
}

#[test]
fn pnmio_reg() {
    let mut rp = RegParams::new("pnmio");

    // 1 bpp: one inked pixel in the last column of row 1
    let mut pbm = b"P4\n10 2\n".to_vec();
    pbm.extend_from_slice(&[0x00, 0x00, 0x00, 0x40]);
    let pix = read_image_mem(&pbm).expect("read pbm");
    rp.compare_values(1.0, pix.depth().bits() as f64, 0.0);
    rp.compare_values(1.0, pix.count_pixels() as f64, 0.0);
    rp.compare_values(1.0, pix.get_pixel(9, 1).unwrap_or(0) as f64, 0.0);

    // 8 bpp with maxval 3 scales to the full range
    let mut pgm = b"P5\n# four levels\n4 1\n3\n".to_vec();
    pgm.extend_from_slice(&[0, 1, 2, 3]);
    let pix = read_image_mem(&pgm).expect("read pgm");
    rp.compare_values(8.0, pix.depth().bits() as f64, 0.0);
    let row: Vec<u32> = (0..4).map(|x| pix.get_pixel(x, 0).unwrap_or(0)).collect();
    rp.compare_rows(&[0, 85, 170, 255], &row);

    // 16-bit PGM keeps its samples
    let mut pgm16 = b"P5\n1 1\n65535\n".to_vec();
    pgm16.extend_from_slice(&[0x12, 0x34]);
    let pix = read_image_mem(&pgm16).expect("read 16-bit pgm");
    rp.compare_values(
        1.0,
        if pix.depth() == PixelDepth::Bit16 {
            1.0
        } else {
            0.0
        },
        0.0,
    );
    rp.compare_values(0x1234 as f64, pix.get_pixel(0, 0).unwrap_or(0) as f64, 0.0);

    // PPM
    let mut ppm = b"P6\n2 1\n255\n".to_vec();
    ppm.extend_from_slice(&[10, 20, 30, 200, 100, 0]);
    let pix = read_image_mem(&ppm).expect("read ppm");
    let (r, g, b) = pix.get_rgb(1, 0).unwrap_or((0, 0, 0));
    rp.compare_rows(&[200, 100, 0], &[r as u32, g as u32, b as u32]);

    assert!(rp.cleanup(), "pnmio regression test failed");
}

#[test]
fn pnmio_malformed_reg() {
    let mut rp = RegParams::new("pnmio_malformed");

    // Headers declaring far more raster than the buffer holds
    rp.compare_values(
        1.0,
        is_invalid_data(&read_image_mem(b"P4\n4000000000 4000000000\n\x00")),
        0.0,
    );
    rp.compare_values(
        1.0,
        is_invalid_data(&read_image_mem(b"P5\n65536 65536\n255\n\x00\x00")),
        0.0,
    );
    rp.compare_values(
        1.0,
        is_invalid_data(&read_image_mem(b"P6\n3 3\n255\n\x00\x00\x00")),
        0.0,
    );

    // Bad header fields
    rp.compare_values(
        1.0,
        is_invalid_data(&read_image_mem(b"P5\n-1 2\n255\n")),
        0.0,
    );
    rp.compare_values(
        1.0,
        is_invalid_data(&read_image_mem(b"P5\n2 2\n0\n\x00\x00\x00\x00")),
        0.0,
    );

    // Zero-sized image: the core constructor rejects it
    let zero = read_image_mem(b"P5\n10 0\n255\n");
    rp.compare_values(
        1.0,
        if matches!(
            zero,
            Err(IoError::Core(bandcut_core::Error::InvalidDimension {
                width: 10,
                height: 0
            }))
        ) {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    assert!(rp.cleanup(), "pnmio_malformed regression test failed");
}
