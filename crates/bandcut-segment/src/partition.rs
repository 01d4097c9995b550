//! Partitioning
//!
//! Turns a split sequence into consecutive row ranges and slices an image
//! into one full-width sub-image per range.

use crate::{SegmentResult, SplitSequence};
use bandcut_core::Pix;

/// Half-open row range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowRange {
    /// First row
    pub start: u32,
    /// One past the last row
    pub end: u32,
}

impl RowRange {
    /// Create a range covering `[start, end)`.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Number of rows
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// True for a zero-length range
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// One component band cut from an image.
#[derive(Debug, Clone)]
pub struct Segment {
    /// 1-based position in the image, top to bottom
    pub index: usize,
    /// Rows of the source image covered by this segment
    pub range: RowRange,
    /// The sub-image
    pub pix: Pix,
}

/// Consecutive `(splits[i], splits[i + 1])` pairs of the sequence.
pub fn segment_ranges(sequence: &SplitSequence) -> Vec<RowRange> {
    sequence
        .as_slice()
        .windows(2)
        .map(|w| RowRange::new(w[0], w[1]))
        .collect()
}

/// Slice `pix` into one full-width segment per range, in range order.
///
/// # Errors
///
/// Fails if a range is empty or extends past the image height.
pub fn slice_segments(pix: &Pix, ranges: &[RowRange]) -> SegmentResult<Vec<Segment>> {
    ranges
        .iter()
        .enumerate()
        .map(|(i, &range)| {
            let sub = pix.clip_rows(range.start, range.end)?;
            Ok(Segment {
                index: i + 1,
                range,
                pix: sub,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_split_sequence;
    use bandcut_test::synthetic;

    #[test]
    fn test_segment_ranges() {
        let plan = build_split_sequence(&[3, 8], 12).unwrap();
        let ranges = segment_ranges(&plan.sequence);
        assert_eq!(
            ranges,
            vec![RowRange::new(0, 3), RowRange::new(3, 8), RowRange::new(8, 12)]
        );
        assert_eq!(ranges.iter().map(RowRange::len).sum::<u32>(), 12);
    }

    #[test]
    fn test_slice_segments() {
        let pix = synthetic::binary_bands(40, 12, &[1..3, 9..11]).unwrap();
        let ranges = [RowRange::new(0, 6), RowRange::new(6, 12)];
        let segs = slice_segments(&pix, &ranges).unwrap();

        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].index, 1);
        assert_eq!(segs[1].index, 2);
        assert_eq!((segs[1].pix.width(), segs[1].pix.height()), (40, 6));
        // Row 9 of the source is row 3 of the second segment
        assert_eq!(segs[1].pix.get_pixel(20, 3), Some(1));
        assert_eq!(segs[1].pix.get_pixel(20, 2), Some(0));
        assert_eq!(segs[0].pix.count_pixels() + segs[1].pix.count_pixels(), pix.count_pixels());
    }

    #[test]
    fn test_slice_rejects_bad_ranges() {
        let pix = synthetic::binary_bands(8, 4, &[]).unwrap();
        assert!(slice_segments(&pix, &[RowRange::new(2, 2)]).is_err());
        assert!(slice_segments(&pix, &[RowRange::new(0, 5)]).is_err());
    }
}
