use crate::{SplitReport, SplitResult, split_image_file};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bandcut")]
#[command(version, about = "Split an image of stacked components into one file per band", long_about = None)]
pub struct Cli {
    /// Image to split
    pub input: PathBuf,

    /// Output prefix; segments are written as {PREFIX}_{N}.png
    pub prefix: PathBuf,
}

/// Parse the command line, run the split and print the number of
/// segments written.
pub fn run() -> SplitResult<SplitReport> {
    let cli = Cli::parse();
    let report = split_image_file(&cli.input, &cli.prefix)?;

    for failure in &report.export.failures {
        eprintln!(
            "Failed to write segment {} to {}: {}",
            failure.index,
            failure.path.display(),
            failure.error
        );
    }
    println!("{}", report.segments_written());
    Ok(report)
}
