//! Error types for bandcut-segment

use thiserror::Error;

/// Errors that can occur during row segmentation
#[derive(Debug, Error)]
pub enum SegmentError {
    /// Core library error (e.g. a row range outside the image)
    #[error("core error: {0}")]
    Core(#[from] bandcut_core::Error),

    /// The image has no rows or no columns
    #[error("empty image: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// An occupied-row set was built for a different image height
    #[error("height mismatch: expected {expected}, got {actual}")]
    HeightMismatch { expected: u32, actual: u32 },

    /// Occupied rows out of order or out of range
    #[error("invalid occupied rows: {0}")]
    InvalidRows(String),
}

/// Result type for segmentation operations
pub type SegmentResult<T> = Result<T, SegmentError>;
