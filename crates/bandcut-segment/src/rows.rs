//! Row classification
//!
//! A row is *occupied* when at least one of its pixels differs from the
//! background value. Scanning stops at the first such pixel.

use crate::{SegmentError, SegmentResult};
use bandcut_core::pix::last_word_mask;
use bandcut_core::{Pix, PixelDepth};

/// Classifies rows of an image as occupied or empty.
///
/// The default classifier treats 0 as background, which is the 1 bpp
/// convention of binarized images (0 = background, 1 = ink).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowClassifier {
    background: u32,
}

impl RowClassifier {
    /// Create a classifier for the given background pixel value.
    ///
    /// For 32 bpp images the value is compared as the whole packed pixel,
    /// alpha included.
    pub fn new(background: u32) -> Self {
        Self { background }
    }

    /// Get the background value
    pub fn background(&self) -> u32 {
        self.background
    }

    /// Whether row `y` contains any non-background pixel.
    ///
    /// # Panics
    ///
    /// Panics if `y >= pix.height()`.
    pub fn is_row_occupied(&self, pix: &Pix, y: u32) -> bool {
        if pix.depth() == PixelDepth::Bit1 {
            return self.is_binary_row_occupied(pix, y);
        }
        let bg = self.background & pix.depth().max_value();
        (0..pix.width()).any(|x| pix.get_pixel_unchecked(x, y) != bg)
    }

    /// Word-at-a-time scan for 1 bpp rows.
    fn is_binary_row_occupied(&self, pix: &Pix, y: u32) -> bool {
        let row = pix.row_data(y);
        let Some((last, full)) = row.split_last() else {
            return false;
        };
        let mask = last_word_mask(pix.width(), PixelDepth::Bit1);
        let bg_word = if self.background & 1 == 0 { 0 } else { !0u32 };

        full.iter().any(|&w| w != bg_word) || (last & mask) != (bg_word & mask)
    }

    /// Classify every row and collect the occupied ones in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::EmptyImage`] if the image has no rows or
    /// no columns.
    pub fn occupied_rows(&self, pix: &Pix) -> SegmentResult<OccupiedRows> {
        let (width, height) = (pix.width(), pix.height());
        if width == 0 || height == 0 {
            return Err(SegmentError::EmptyImage { width, height });
        }

        let occupied: Vec<bool> = (0..height).map(|y| self.is_row_occupied(pix, y)).collect();
        let rows = occupied
            .iter()
            .enumerate()
            .filter_map(|(y, &o)| o.then_some(y as u32))
            .collect();
        Ok(OccupiedRows { rows, occupied })
    }
}

/// The occupied rows of an image.
///
/// Holds both the ascending index list and a per-row table, so
/// membership tests are O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupiedRows {
    rows: Vec<u32>,
    occupied: Vec<bool>,
}

impl OccupiedRows {
    /// Build from an explicit list of occupied row indices.
    ///
    /// # Errors
    ///
    /// The list must be strictly increasing and every index `< height`.
    pub fn from_rows(height: u32, rows: &[u32]) -> SegmentResult<Self> {
        if let Some(w) = rows.windows(2).find(|w| w[0] >= w[1]) {
            return Err(SegmentError::InvalidRows(format!(
                "rows not strictly increasing: {} then {}",
                w[0], w[1]
            )));
        }
        if let Some(&last) = rows.last()
            && last >= height
        {
            return Err(SegmentError::InvalidRows(format!(
                "row {} outside height {}",
                last, height
            )));
        }

        let mut occupied = vec![false; height as usize];
        for &y in rows {
            occupied[y as usize] = true;
        }
        Ok(Self {
            rows: rows.to_vec(),
            occupied,
        })
    }

    /// Height of the image the rows were taken from
    pub fn height(&self) -> u32 {
        self.occupied.len() as u32
    }

    /// Number of occupied rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if no row is occupied
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether row `y` is occupied; rows past the height are not.
    #[inline]
    pub fn contains(&self, y: u32) -> bool {
        self.occupied.get(y as usize).copied().unwrap_or(false)
    }

    /// Occupied row indices in ascending order
    pub fn as_slice(&self) -> &[u32] {
        &self.rows
    }

    /// Empty row indices in ascending order
    pub fn empty_rows(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.height()).filter(|&y| !self.contains(y))
    }
}
