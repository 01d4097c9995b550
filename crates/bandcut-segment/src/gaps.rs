//! Empty-run detection
//!
//! Groups the empty rows of an image into maximal runs of consecutive
//! indices.

use crate::{OccupiedRows, SegmentError, SegmentResult};

/// A maximal run of empty rows, half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyRun {
    /// First empty row
    pub start: u32,
    /// One past the last empty row
    pub end: u32,
}

impl EmptyRun {
    /// Create a run covering `[start, end)`.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Number of rows in the run
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// True for a zero-length run
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Floor midpoint of the run, `(start + end) / 2`.
    pub fn breakpoint(&self) -> u32 {
        // u64 so start + end cannot overflow for runs near u32::MAX
        ((u64::from(self.start) + u64::from(self.end)) / 2) as u32
    }
}

/// Find the maximal runs of empty rows in `[0, height)`.
///
/// Works on the literal ascending list of empty row indices and starts a
/// new run whenever the next index is not exactly one past the previous.
/// A first empty row at 0 starts the first run at 0; a last empty row at
/// `height - 1` ends the last run at `height`.
///
/// # Errors
///
/// - [`SegmentError::EmptyImage`] if `height == 0`
/// - [`SegmentError::HeightMismatch`] if `occupied` was built for another height
pub fn find_empty_runs(height: u32, occupied: &OccupiedRows) -> SegmentResult<Vec<EmptyRun>> {
    if height == 0 {
        return Err(SegmentError::EmptyImage { width: 0, height });
    }
    if occupied.height() != height {
        return Err(SegmentError::HeightMismatch {
            expected: height,
            actual: occupied.height(),
        });
    }

    let mut runs: Vec<EmptyRun> = Vec::new();
    for y in occupied.empty_rows() {
        match runs.last_mut() {
            Some(run) if run.end == y => run.end = y + 1,
            _ => runs.push(EmptyRun::new(y, y + 1)),
        }
    }
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs_for(height: u32, occupied: &[u32]) -> Vec<(u32, u32)> {
        let occ = OccupiedRows::from_rows(height, occupied).unwrap();
        find_empty_runs(height, &occ)
            .unwrap()
            .into_iter()
            .map(|r| (r.start, r.end))
            .collect()
    }

    #[test]
    fn test_interior_runs() {
        assert_eq!(runs_for(8, &[0, 1, 4, 7]), vec![(2, 4), (5, 7)]);
    }

    #[test]
    fn test_runs_touching_boundaries() {
        assert_eq!(runs_for(6, &[2, 3]), vec![(0, 2), (4, 6)]);
        assert_eq!(runs_for(3, &[1]), vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn test_no_empty_rows() {
        assert!(runs_for(4, &[0, 1, 2, 3]).is_empty());
    }

    #[test]
    fn test_all_empty() {
        assert_eq!(runs_for(9, &[]), vec![(0, 9)]);
    }

    #[test]
    fn test_single_row_gaps_do_not_merge() {
        assert_eq!(runs_for(5, &[1, 3]), vec![(0, 1), (2, 3), (4, 5)]);
    }

    #[test]
    fn test_breakpoint_floor() {
        assert_eq!(EmptyRun::new(0, 20).breakpoint(), 10);
        assert_eq!(EmptyRun::new(58, 79).breakpoint(), 68);
        assert_eq!(EmptyRun::new(0, 1).breakpoint(), 0);
        assert_eq!(EmptyRun::new(4, 5).breakpoint(), 4);
        assert_eq!(EmptyRun::new(u32::MAX - 1, u32::MAX).breakpoint(), u32::MAX - 1);
        assert_eq!(EmptyRun::new(3, 7).len(), 4);
    }

    #[test]
    fn test_errors() {
        let occ = OccupiedRows::from_rows(5, &[1]).unwrap();
        assert!(matches!(
            find_empty_runs(6, &occ),
            Err(SegmentError::HeightMismatch {
                expected: 6,
                actual: 5
            })
        ));
        let none = OccupiedRows::from_rows(0, &[]).unwrap();
        assert!(matches!(
            find_empty_runs(0, &none),
            Err(SegmentError::EmptyImage { .. })
        ));
    }
}
