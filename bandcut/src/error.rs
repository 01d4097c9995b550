//! Error types for the bandcut pipeline

use bandcut_io::IoError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from turning an image into a binary image
#[derive(Debug, Error)]
pub enum BinarizeError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] bandcut_core::Error),

    /// Masking, gray conversion or thresholding failed
    #[error("color error: {0}")]
    Color(#[from] bandcut_color::ColorError),

    /// Morphological cleanup failed
    #[error("morphology error: {0}")]
    Morph(#[from] bandcut_morph::MorphError),
}

/// Fatal errors of a split run. Nothing is written when one occurs.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The input is missing or not a decodable image
    #[error("cannot decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    /// The image has no rows or no columns
    #[error("empty image: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// Binarization failed
    #[error("binarize error: {0}")]
    Binarize(#[from] BinarizeError),

    /// Row segmentation failed
    #[error("segment error: {0}")]
    Segment(#[from] bandcut_segment::SegmentError),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] bandcut_core::Error),
}

/// Result type for pipeline operations
pub type SplitResult<T> = Result<T, SplitError>;
