//! The split pipeline
//!
//! decode -> binarize -> classify rows -> empty runs -> split sequence ->
//! partition -> export

use crate::binarize::{BinarizeOptions, binarize};
use crate::export::{ExportReport, export_segments};
use crate::{SplitError, SplitResult};
use bandcut_core::{ImageFormat, Pix};
use bandcut_io::IoError;
use bandcut_segment::{RowClassifier, Segment, SplitPlan, SplitWarning, slice_segments, split_rows};
use std::path::Path;

/// Which image the segments are cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliceSource {
    /// The decoded input image
    #[default]
    Original,
    /// The binarized image the split rows were computed on
    Binarized,
}

/// Options for a split run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
    /// Binarization settings
    pub binarize: BinarizeOptions,
    /// Background value of the binarized image
    pub background: u32,
    /// Image the segments are cut from
    pub source: SliceSource,
    /// Output format of the exported segments
    pub format: ImageFormat,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            binarize: BinarizeOptions::default(),
            background: 0,
            source: SliceSource::Original,
            format: ImageFormat::Png,
        }
    }
}

impl SplitOptions {
    /// Set the binarization options
    pub fn with_binarize(mut self, binarize: BinarizeOptions) -> Self {
        self.binarize = binarize;
        self
    }

    /// Set the background value used to classify rows
    pub fn with_background(mut self, background: u32) -> Self {
        self.background = background;
        self
    }

    /// Set the image segments are cut from
    pub fn with_source(mut self, source: SliceSource) -> Self {
        self.source = source;
        self
    }

    /// Set the output format
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }
}

/// Result of [`split_image_file`]
#[derive(Debug)]
pub struct SplitReport {
    /// Split sequence and dropped breakpoints
    pub plan: SplitPlan,
    /// Written and failed segments
    pub export: ExportReport,
}

impl SplitReport {
    /// Number of segment files written
    pub fn segments_written(&self) -> usize {
        self.export.written_count()
    }

    /// Breakpoints dropped while building the split sequence
    pub fn warnings(&self) -> &[SplitWarning] {
        &self.plan.warnings
    }
}

/// Split `pix` into its row bands.
///
/// # Errors
///
/// Returns [`SplitError::EmptyImage`] for an image without rows or
/// columns, or the error of the failing stage.
pub fn split_image(pix: &Pix, options: &SplitOptions) -> SplitResult<Vec<Segment>> {
    plan_and_slice(pix, options).map(|(_, segments)| segments)
}

fn plan_and_slice(pix: &Pix, options: &SplitOptions) -> SplitResult<(SplitPlan, Vec<Segment>)> {
    let (width, height) = (pix.width(), pix.height());
    if width == 0 || height == 0 {
        return Err(SplitError::EmptyImage { width, height });
    }

    let binary = binarize(pix, &options.binarize)?;
    let plan = split_rows(&binary, &RowClassifier::new(options.background))?;

    let source = match options.source {
        SliceSource::Original => pix,
        SliceSource::Binarized => &binary,
    };
    let segments = slice_segments(source, &plan.ranges())?;
    Ok((plan, segments))
}

/// Split the image at `input` and write the segments under `prefix` with
/// default options.
pub fn split_image_file<P, Q>(input: P, prefix: Q) -> SplitResult<SplitReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    split_image_file_with(input, prefix, &SplitOptions::default())
}

/// Split the image at `input` and write the segments as
/// `{prefix}_{index}.{ext}`.
///
/// Decode and empty-image errors abort before anything is written. An
/// input whose header declares zero rows or columns is reported as
/// [`SplitError::EmptyImage`]. A segment that fails to write is recorded
/// in the report and the remaining segments are still written.
pub fn split_image_file_with<P, Q>(
    input: P,
    prefix: Q,
    options: &SplitOptions,
) -> SplitResult<SplitReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let pix = bandcut_io::read_image(input).map_err(|source| decode_error(input, source))?;
    tracing::debug!(
        path = %input.display(),
        width = pix.width(),
        height = pix.height(),
        depth = pix.depth().bits(),
        "decoded input"
    );

    let (plan, segments) = plan_and_slice(&pix, options)?;
    let export = export_segments(&segments, prefix, options.format);
    tracing::info!(
        segments = segments.len(),
        written = export.written_count(),
        failed = export.failures.len(),
        "split complete"
    );
    Ok(SplitReport { plan, export })
}

/// A decode failure, or [`SplitError::EmptyImage`] when the file decoded to
/// a header with zero rows or columns.
fn decode_error(path: &Path, source: IoError) -> SplitError {
    match source {
        IoError::Core(bandcut_core::Error::InvalidDimension { width, height }) => {
            SplitError::EmptyImage { width, height }
        }
        source => SplitError::Decode {
            path: path.to_path_buf(),
            source,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandcut_test::synthetic;

    #[test]
    fn test_split_image_rgb() {
        let pix = synthetic::rgb_bands(64, 120, &[10..30, 60..80], (0, 0, 0)).unwrap();
        let segments = split_image(&pix, &SplitOptions::default()).unwrap();
        let ranges: Vec<(u32, u32)> = segments
            .iter()
            .map(|s| (s.range.start, s.range.end))
            .collect();
        // empty runs [0,10) [30,60) [80,120)
        assert_eq!(ranges, vec![(0, 5), (5, 45), (45, 100), (100, 120)]);
        assert!(segments.iter().all(|s| s.pix.depth() == pix.depth()));
    }

    #[test]
    fn test_binarized_source() {
        let pix = synthetic::gray_bands(32, 40, &[5..10]).unwrap();
        let opts = SplitOptions::default().with_source(SliceSource::Binarized);
        let segments = split_image(&pix, &opts).unwrap();
        assert!(
            segments
                .iter()
                .all(|s| s.pix.depth() == bandcut_core::PixelDepth::Bit1)
        );
        assert_eq!(segments.iter().map(|s| s.pix.height()).sum::<u32>(), 40);
    }

    #[test]
    fn test_default_options() {
        let opts = SplitOptions::default();
        assert_eq!(opts.format, ImageFormat::Png);
        assert_eq!(opts.source, SliceSource::Original);
        assert_eq!(opts.background, 0);
        assert_eq!(opts.binarize.close_size, 17);
    }
}
