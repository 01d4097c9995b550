//! bandcut - Split images of stacked components into row bands
//!
//! An image of components stacked top to bottom is binarized, every row is
//! classified as occupied or empty, each maximal run of empty rows is cut
//! at its floor midpoint, and the bands between the cuts are written as
//! `{prefix}_{index}.png`.
//!
//! # Overview
//!
//! - Image container and pixel access ([`Pix`], re-exported from core)
//! - Image I/O: PNG, JPEG, PNM ([`io`])
//! - Binarization ([`binarize()`]), built on [`color`] and [`morph`]
//! - Row-gap segmentation ([`segment`])
//! - Export and the file-to-files entry point ([`split_image_file`])
//!
//! # Example
//!
//! ```
//! use bandcut::{SplitOptions, split_image};
//! use bandcut::{Pix, PixMut, PixelDepth};
//!
//! // Two dark blocks on white, 30 empty rows apart
//! let mut pm = PixMut::new(40, 60, PixelDepth::Bit8).unwrap();
//! pm.set_all();
//! for y in (5..15).chain(45..55) {
//!     for x in 10..30 {
//!         pm.set_pixel(x, y, 0).unwrap();
//!     }
//! }
//! let pix: Pix = pm.into();
//!
//! let segments = split_image(&pix, &SplitOptions::default()).unwrap();
//! let cuts: Vec<u32> = segments.iter().map(|s| s.range.start).collect();
//! assert_eq!(cuts, vec![0, 2, 30, 57]);
//! ```

pub mod binarize;
pub mod cli;
mod error;
pub mod export;
pub mod pipeline;

// Re-export core types (primary data structures used everywhere)
pub use bandcut_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use bandcut_color as color;
pub use bandcut_io as io;
pub use bandcut_morph as morph;
pub use bandcut_segment as segment;

pub use binarize::{BinarizeOptions, DEFAULT_BORDER_COLOR, ThresholdMethod, binarize};
pub use error::{BinarizeError, SplitError, SplitResult};
pub use export::{ExportFailure, ExportReport, export_segments, segment_path};
pub use pipeline::{
    SliceSource, SplitOptions, SplitReport, split_image, split_image_file, split_image_file_with,
};
