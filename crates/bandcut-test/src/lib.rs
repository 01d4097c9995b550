//! bandcut-test - Regression test harness for bandcut
//!
//! Provides a small regression framework in two modes:
//!
//! - **Compare**: check computed values, row lists and images (default)
//! - **Display**: also write inspection images to `tests/regout`
//!
//! plus [`synthetic`] builders for stacked-component fixtures, since the
//! workspace ships no image data.
//!
//! # Usage
//!
//! ```ignore
//! use bandcut_test::{RegParams, synthetic};
//!
//! let pix = synthetic::binary_bands(64, 100, &[10..30, 60..90]).unwrap();
//! let mut rp = RegParams::new("rowsplit");
//! rp.compare_values(2.0, bands as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;
pub mod synthetic;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // bandcut-test is at crates/bandcut-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
