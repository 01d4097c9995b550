//! Row-split regression test
//!
//! Checks the partition properties of the row-gap segmentation on
//! synthetic band images: complete tiling, maximal runs, strictly
//! increasing split sequences, determinism, and the boundary cases.
//!
//! Run with:
//! ```
//! cargo test -p bandcut-segment --test rowsplit_reg
//! ```

use bandcut_core::Pix;
use bandcut_segment::{
    OccupiedRows, RowClassifier, SplitWarning, build_split_sequence, find_empty_runs,
    segment_ranges, select_breakpoints, slice_segments, split_rows,
};
use bandcut_test::{RegParams, synthetic};
use std::ops::Range;

/// Deterministic band layouts, including ones touching both edges.
fn layouts() -> Vec<(u32, Vec<Range<u32>>)> {
    let mut out = vec![
        (40, vec![5..10, 20..30]),
        (40, vec![0..10, 20..40]),
        (40, vec![0..40]),
        (40, vec![]),
        (1, vec![]),
        (1, vec![0..1]),
        (2, vec![1..2]),
        (50, vec![1..49]),
        (50, vec![0..1, 2..3, 4..5, 48..49]),
    ];

    // Pseudo-random layouts from a small LCG
    let mut state: u32 = 12345;
    let mut next = |m: u32| {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
        (state >> 16) % m
    };
    for _ in 0..20 {
        let height = 20 + next(200);
        let mut bands = Vec::new();
        let mut y = next(5);
        while y < height {
            let len = 1 + next(25);
            let end = (y + len).min(height);
            bands.push(y..end);
            y = end + next(12);
        }
        out.push((height, bands));
    }
    out
}

fn rows_of(pix: &Pix) -> OccupiedRows {
    RowClassifier::default().occupied_rows(pix).expect("classify")
}

#[test]
fn rowsplit_reg() {
    let mut rp = RegParams::new("rowsplit");

    for (height, bands) in layouts() {
        let pix = synthetic::binary_bands(45, height, &bands).expect("fixture");
        let occupied = rows_of(&pix);
        let runs = find_empty_runs(height, &occupied).expect("runs");
        let plan = split_rows(&pix, &RowClassifier::default()).expect("plan");
        let seq = plan.sequence.as_slice();

        // Breakpoint ordering: 0 first, height last, strictly increasing
        rp.compare_values(0.0, seq[0] as f64, 0.0);
        rp.compare_values(height as f64, *seq.last().unwrap() as f64, 0.0);
        rp.compare_values(
            1.0,
            if seq.windows(2).all(|w| w[0] < w[1]) {
                1.0
            } else {
                0.0
            },
            0.0,
        );

        // Partition completeness: ranges tile [0, height)
        let ranges = plan.ranges();
        rp.compare_values(
            height as f64,
            ranges.iter().map(|r| r.len() as f64).sum(),
            0.0,
        );
        let contiguous = ranges.windows(2).all(|w| w[0].end == w[1].start)
            && ranges.first().map(|r| r.start) == Some(0)
            && ranges.last().map(|r| r.end) == Some(height)
            && ranges.iter().all(|r| !r.is_empty());
        rp.compare_values(1.0, if contiguous { 1.0 } else { 0.0 }, 0.0);
        rp.compare_values((seq.len() - 1) as f64, ranges.len() as f64, 0.0);

        // Run maximality: neighbors of every run are occupied or out of bounds
        let maximal = runs.iter().all(|r| {
            (r.start == 0 || occupied.contains(r.start - 1))
                && (r.end == height || occupied.contains(r.end))
                && (r.start..r.end).all(|y| !occupied.contains(y))
        }) && runs.windows(2).all(|w| w[0].end < w[1].start);
        rp.compare_values(1.0, if maximal { 1.0 } else { 0.0 }, 0.0);

        // Every empty row is covered by exactly one run
        let covered: u32 = runs.iter().map(|r| r.len()).sum();
        rp.compare_values(
            (height as usize - occupied.len()) as f64,
            covered as f64,
            0.0,
        );

        // Segments reassemble the image
        let segments = slice_segments(&pix, &ranges).expect("slice");
        let total: u64 = segments.iter().map(|s| s.pix.count_pixels()).sum();
        rp.compare_values(pix.count_pixels() as f64, total as f64, 0.0);
        let heights: u32 = segments.iter().map(|s| s.pix.height()).sum();
        rp.compare_values(height as f64, heights as f64, 0.0);

        // Idempotence
        let again = split_rows(&pix, &RowClassifier::default()).expect("plan");
        rp.compare_rows(seq, again.sequence.as_slice());
    }

    assert!(rp.cleanup(), "rowsplit regression test failed");
}

#[test]
fn rowsplit_observed_layout_reg() {
    let mut rp = RegParams::new("rowsplit_observed");

    let height = 602;
    let empty = [0..20, 58..79, 184..205, 319..348, 462..517];
    let pix = synthetic::binary_with_empty_runs(300, height, &empty).expect("fixture");

    let occupied = rows_of(&pix);
    let empty_total: u32 = empty.iter().map(|r| r.end - r.start).sum();
    rp.compare_values((height - empty_total) as f64, occupied.len() as f64, 0.0);

    let runs = find_empty_runs(height, &occupied).expect("runs");
    let bounds: Vec<u32> = runs.iter().flat_map(|r| [r.start, r.end]).collect();
    rp.compare_rows(
        &[0, 20, 58, 79, 184, 205, 319, 348, 462, 517],
        &bounds,
    );

    let breakpoints = select_breakpoints(&runs);
    rp.compare_rows(&[10, 68, 194, 333, 489], &breakpoints);

    let plan = build_split_sequence(&breakpoints, height).expect("plan");
    rp.compare_rows(&[0, 10, 68, 194, 333, 489, 602], plan.sequence.as_slice());
    rp.compare_values(0.0, plan.warnings.len() as f64, 0.0);

    let ranges: Vec<u32> = segment_ranges(&plan.sequence)
        .iter()
        .flat_map(|r| [r.start, r.end])
        .collect();
    rp.compare_rows(
        &[0, 10, 10, 68, 68, 194, 194, 333, 333, 489, 489, 602],
        &ranges,
    );

    let segments = slice_segments(&pix, &plan.ranges()).expect("slice");
    rp.compare_values(6.0, segments.len() as f64, 0.0);
    for seg in &segments {
        rp.write_pix_display(&seg.pix, &format!("seg{}", seg.index))
            .expect("display");
    }

    assert!(rp.cleanup(), "rowsplit_observed regression test failed");
}

#[test]
fn rowsplit_boundary_cases_reg() {
    let mut rp = RegParams::new("rowsplit_boundary");
    let classifier = RowClassifier::default();

    // All occupied: one segment spanning the image
    let full = synthetic::binary_bands(20, 15, &[0..15]).expect("fixture");
    let plan = split_rows(&full, &classifier).expect("plan");
    rp.compare_rows(&[0, 15], plan.sequence.as_slice());
    let segs = slice_segments(&full, &plan.ranges()).expect("slice");
    rp.compare_values(1.0, segs.len() as f64, 0.0);
    rp.compare_pix(&full, &segs[0].pix);

    // All empty: one run, one breakpoint at its midpoint, two segments
    let blank = synthetic::binary_bands(20, 15, &[]).expect("fixture");
    let runs = find_empty_runs(15, &rows_of(&blank)).expect("runs");
    rp.compare_values(1.0, runs.len() as f64, 0.0);
    rp.compare_rows(&[0, 15], &[runs[0].start, runs[0].end]);
    let plan = split_rows(&blank, &classifier).expect("plan");
    rp.compare_rows(&[0, 7, 15], plan.sequence.as_slice());
    rp.compare_values(2.0, plan.segment_count() as f64, 0.0);

    // First and last rows empty
    let edges = synthetic::binary_bands(20, 12, &[3..9]).expect("fixture");
    let plan = split_rows(&edges, &classifier).expect("plan");
    rp.compare_rows(&[0, 1, 10, 12], plan.sequence.as_slice());
    rp.compare_values(0.0, plan.warnings.len() as f64, 0.0);

    // One-row gap at the top: breakpoint 0 collapses into the boundary
    let top = synthetic::binary_bands(20, 12, &[1..12]).expect("fixture");
    let plan = split_rows(&top, &classifier).expect("plan");
    rp.compare_rows(&[0, 12], plan.sequence.as_slice());
    rp.compare_values(
        1.0,
        if plan.warnings == [SplitWarning::DegenerateBreakpoint { row: 0, run: 0 }] {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    // One-row gap at the bottom keeps its own segment
    let bottom = synthetic::binary_bands(20, 12, &[0..11]).expect("fixture");
    let plan = split_rows(&bottom, &classifier).expect("plan");
    rp.compare_rows(&[0, 11, 12], plan.sequence.as_slice());

    // Single-row images
    let one_empty = synthetic::binary_bands(20, 1, &[]).expect("fixture");
    let plan = split_rows(&one_empty, &classifier).expect("plan");
    rp.compare_rows(&[0, 1], plan.sequence.as_slice());
    rp.compare_values(1.0, plan.warnings.len() as f64, 0.0);

    assert!(rp.cleanup(), "rowsplit_boundary regression test failed");
}

#[test]
fn rowsplit_depths_reg() {
    let mut rp = RegParams::new("rowsplit_depths");
    let bands = [4..10, 18..25];

    let binary = synthetic::binary_bands(30, 30, &bands).expect("fixture");
    let gray = synthetic::gray_bands(30, 30, &bands).expect("fixture");
    let rgb = synthetic::rgb_bands(30, 30, &bands, (0, 0, 0)).expect("fixture");

    let expected = split_rows(&binary, &RowClassifier::default()).expect("plan");
    let from_gray = split_rows(&gray, &RowClassifier::new(255)).expect("plan");
    let from_rgb = split_rows(&rgb, &RowClassifier::new(0xFFFF_FFFF)).expect("plan");

    rp.compare_rows(&[0, 2, 14, 27, 30], expected.sequence.as_slice());
    rp.compare_rows(expected.sequence.as_slice(), from_gray.sequence.as_slice());
    rp.compare_rows(expected.sequence.as_slice(), from_rgb.sequence.as_slice());

    assert!(rp.cleanup(), "rowsplit_depths regression test failed");
}
