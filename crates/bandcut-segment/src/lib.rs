//! bandcut-segment - Row-gap segmentation
//!
//! Splits a binary image of vertically stacked components into row bands:
//!
//! 1. [`RowClassifier`] marks each row occupied or empty
//! 2. [`find_empty_runs`] groups empty rows into maximal runs
//! 3. [`select_breakpoints`] / [`build_split_sequence`] cut each run at its
//!    floor midpoint
//! 4. [`segment_ranges`] / [`slice_segments`] partition the image
//!
//! Every stage is a pure function of the previous stage's output.
//! [`split_rows`] runs stages 1 to 3.
//!
//! # Example
//!
//! ```
//! use bandcut_core::{Pix, PixMut, PixelDepth};
//! use bandcut_segment::{RowClassifier, slice_segments, split_rows};
//!
//! let mut pm = PixMut::new(16, 10, PixelDepth::Bit1).unwrap();
//! for y in [1, 2, 7, 8] {
//!     pm.set_pixel(5, y, 1).unwrap();
//! }
//! let pix: Pix = pm.into();
//!
//! let plan = split_rows(&pix, &RowClassifier::default()).unwrap();
//! // runs [0,1) [3,7) [9,10); the midpoint 0 of the first is dropped
//! assert_eq!(plan.sequence.as_slice(), &[0, 5, 9, 10]);
//!
//! let segments = slice_segments(&pix, &plan.ranges()).unwrap();
//! assert_eq!(segments.len(), 3);
//! ```

pub mod breakpoints;
mod error;
pub mod gaps;
pub mod partition;
pub mod rows;

pub use breakpoints::{
    SplitPlan, SplitSequence, SplitWarning, build_split_sequence, select_breakpoints,
};
pub use error::{SegmentError, SegmentResult};
pub use gaps::{EmptyRun, find_empty_runs};
pub use partition::{RowRange, Segment, segment_ranges, slice_segments};
pub use rows::{OccupiedRows, RowClassifier};

use bandcut_core::Pix;

/// Compute the split plan for an image.
///
/// Classifies rows, finds the empty runs and builds the split sequence
/// from their midpoints.
pub fn split_rows(pix: &Pix, classifier: &RowClassifier) -> SegmentResult<SplitPlan> {
    let height = pix.height();
    let occupied = classifier.occupied_rows(pix)?;
    tracing::debug!(height, occupied = occupied.len(), "classified rows");

    let runs = find_empty_runs(height, &occupied)?;
    tracing::debug!(count = runs.len(), ?runs, "found empty runs");

    let breakpoints = select_breakpoints(&runs);
    let plan = build_split_sequence(&breakpoints, height)?;
    tracing::debug!(
        splits = ?plan.sequence.as_slice(),
        dropped = plan.warnings.len(),
        "built split sequence"
    );
    Ok(plan)
}
