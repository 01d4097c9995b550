//! bandcut-color - Color processing for binarization
//!
//! This crate provides the color-side steps of turning artwork into a
//! binary image:
//!
//! - **Color masks** ([`mask`]): select pixels inside an RGB box, repaint them
//! - **Grayscale conversion** ([`colorspace`]): any depth to 8 bpp
//! - **Thresholding** ([`threshold`]): Otsu's method and fixed thresholds

pub mod colorspace;
pub mod error;
pub mod mask;
pub mod threshold;

pub use error::{ColorError, ColorResult};

pub use colorspace::pix_convert_to_gray;
pub use mask::{ColorRange, color_in_range, paint_through_mask};
pub use threshold::{compute_otsu_threshold, otsu_threshold_from_histogram, threshold_to_binary};
