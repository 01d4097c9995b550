//! Segment export
//!
//! Writes each segment to `{prefix}_{index}.{ext}`. Writes are
//! independent: a failure is recorded and the remaining segments are
//! still written.

use bandcut_core::ImageFormat;
use bandcut_io::{IoError, write_image};
use bandcut_segment::Segment;
use std::path::{Path, PathBuf};

/// A segment that could not be written
#[derive(Debug)]
pub struct ExportFailure {
    /// 1-based segment index
    pub index: usize,
    /// Destination path
    pub path: PathBuf,
    /// Underlying write error
    pub error: IoError,
}

/// Outcome of [`export_segments`]
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Paths written, in segment order
    pub written: Vec<PathBuf>,
    /// Failed writes, in segment order
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    /// Number of segments written
    pub fn written_count(&self) -> usize {
        self.written.len()
    }

    /// True if every segment was written
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Output path of segment `index`: `{prefix}_{index}.{ext}`.
///
/// An [`ImageFormat::Unknown`] format writes PNG.
pub fn segment_path(prefix: &Path, index: usize, format: ImageFormat) -> PathBuf {
    let format = match format {
        ImageFormat::Unknown => ImageFormat::Png,
        f => f,
    };
    let mut name = prefix.as_os_str().to_owned();
    name.push(format!("_{}.{}", index, format.extension()));
    PathBuf::from(name)
}

/// Write every segment under `prefix`.
///
/// Parent directories of `prefix` must already exist.
pub fn export_segments<P: AsRef<Path>>(
    segments: &[Segment],
    prefix: P,
    format: ImageFormat,
) -> ExportReport {
    let prefix = prefix.as_ref();
    let mut report = ExportReport::default();

    for segment in segments {
        let path = segment_path(prefix, segment.index, format);
        match write_image(&segment.pix, &path, format) {
            Ok(()) => {
                tracing::debug!(index = segment.index, path = %path.display(), "wrote segment");
                report.written.push(path);
            }
            Err(error) => {
                tracing::warn!(
                    index = segment.index,
                    path = %path.display(),
                    %error,
                    "failed to write segment"
                );
                report.failures.push(ExportFailure {
                    index: segment.index,
                    path,
                    error,
                });
            }
        }
    }
    report
}
