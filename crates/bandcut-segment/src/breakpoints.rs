//! Breakpoint selection and split sequences
//!
//! Each empty run contributes one cut line at its floor midpoint. The cut
//! lines, bracketed by 0 and the image height, form the split sequence.
//!
//! A breakpoint that would not be strictly between the previous split and
//! the height is dropped rather than kept as a zero-length segment, and
//! the drop is reported as a [`SplitWarning`]. With floor midpoints and
//! ascending runs this only happens for a one-row run at row 0.

use crate::{EmptyRun, RowRange, SegmentError, SegmentResult};
use std::fmt;

/// Breakpoint (floor midpoint) of each run, in run order.
pub fn select_breakpoints(runs: &[EmptyRun]) -> Vec<u32> {
    runs.iter().map(EmptyRun::breakpoint).collect()
}

/// Non-fatal issue found while building a split sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitWarning {
    /// A breakpoint coincided with a boundary or the previous split and
    /// was dropped.
    DegenerateBreakpoint {
        /// The dropped breakpoint row
        row: u32,
        /// Position of the breakpoint (and its run) in the input list
        run: usize,
    },
}

impl fmt::Display for SplitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateBreakpoint { row, run } => {
                write!(f, "degenerate breakpoint {} from run {} dropped", row, run)
            }
        }
    }
}

/// Strictly increasing row indices from `0` to `height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSequence {
    splits: Vec<u32>,
}

impl SplitSequence {
    /// The split rows, starting at 0 and ending at the height
    pub fn as_slice(&self) -> &[u32] {
        &self.splits
    }

    /// Image height (the last split)
    pub fn height(&self) -> u32 {
        self.splits.last().copied().unwrap_or(0)
    }

    /// Interior splits, without the 0 and height boundaries
    pub fn breakpoints(&self) -> &[u32] {
        let n = self.splits.len();
        &self.splits[1..n - 1]
    }

    /// Number of segments the sequence defines
    pub fn segment_count(&self) -> usize {
        self.splits.len() - 1
    }
}

/// A split sequence plus the warnings raised while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    /// The split sequence
    pub sequence: SplitSequence,
    /// Dropped breakpoints, in input order
    pub warnings: Vec<SplitWarning>,
}

impl SplitPlan {
    /// Consecutive row ranges of the sequence
    pub fn ranges(&self) -> Vec<RowRange> {
        crate::segment_ranges(&self.sequence)
    }

    /// Number of segments
    pub fn segment_count(&self) -> usize {
        self.sequence.segment_count()
    }
}

/// Build the split sequence `[0, breakpoints..., height]`.
///
/// Breakpoints keep their input order. Any breakpoint that is not strictly
/// greater than the previous split and strictly less than `height` is
/// dropped and reported, so the sequence is always strictly increasing.
///
/// # Errors
///
/// Returns [`SegmentError::EmptyImage`] if `height == 0`.
pub fn build_split_sequence(breakpoints: &[u32], height: u32) -> SegmentResult<SplitPlan> {
    if height == 0 {
        return Err(SegmentError::EmptyImage { width: 0, height });
    }

    let mut splits = Vec::with_capacity(breakpoints.len() + 2);
    let mut warnings = Vec::new();
    splits.push(0);

    for (run, &row) in breakpoints.iter().enumerate() {
        let prev = splits.last().copied().unwrap_or(0);
        if row <= prev || row >= height {
            tracing::warn!(row, run, height, "dropping degenerate breakpoint");
            warnings.push(SplitWarning::DegenerateBreakpoint { row, run });
            continue;
        }
        splits.push(row);
    }

    splits.push(height);
    Ok(SplitPlan {
        sequence: SplitSequence { splits },
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_breakpoints() {
        let runs = [EmptyRun::new(0, 20), EmptyRun::new(58, 79), EmptyRun::new(462, 517)];
        assert_eq!(select_breakpoints(&runs), vec![10, 68, 489]);
        assert!(select_breakpoints(&[]).is_empty());
    }

    #[test]
    fn test_build_sequence() {
        let plan = build_split_sequence(&[10, 68], 100).unwrap();
        assert_eq!(plan.sequence.as_slice(), &[0, 10, 68, 100]);
        assert_eq!(plan.sequence.breakpoints(), &[10, 68]);
        assert_eq!(plan.sequence.height(), 100);
        assert_eq!(plan.segment_count(), 3);
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_no_breakpoints() {
        let plan = build_split_sequence(&[], 7).unwrap();
        assert_eq!(plan.sequence.as_slice(), &[0, 7]);
        assert_eq!(plan.segment_count(), 1);
    }

    #[test]
    fn test_degenerate_top_breakpoint_collapses() {
        // A one-row run [0, 1) has midpoint 0
        let plan = build_split_sequence(&[0, 5], 10).unwrap();
        assert_eq!(plan.sequence.as_slice(), &[0, 5, 10]);
        assert_eq!(
            plan.warnings,
            vec![SplitWarning::DegenerateBreakpoint { row: 0, run: 0 }]
        );
    }

    #[test]
    fn test_out_of_order_and_out_of_range_dropped() {
        let plan = build_split_sequence(&[4, 4, 2, 10, 12], 10).unwrap();
        assert_eq!(plan.sequence.as_slice(), &[0, 4, 10]);
        let rows: Vec<u32> = plan
            .warnings
            .iter()
            .map(|w| match w {
                SplitWarning::DegenerateBreakpoint { row, .. } => *row,
            })
            .collect();
        assert_eq!(rows, vec![4, 2, 10, 12]);
    }

    #[test]
    fn test_single_row_image() {
        let plan = build_split_sequence(&[0], 1).unwrap();
        assert_eq!(plan.sequence.as_slice(), &[0, 1]);
        assert_eq!(plan.warnings.len(), 1);
        assert!(plan.warnings[0].to_string().contains("breakpoint 0"));
    }

    #[test]
    fn test_zero_height() {
        assert!(matches!(
            build_split_sequence(&[], 0),
            Err(SegmentError::EmptyImage { .. })
        ));
    }
}
