//! Re-deriving metrics from retained raw samples.

mod common;

use approx::assert_relative_eq;
use drishti::validation::SampleWindow;
use drishti::{catalog, stats, RecomputeOptions, ValidationError, ValidationResult, MISSING};

/// CROSS_5DEG run where target `i` carries a constant error of
/// `0.5 * 2^i` degrees: accuracies 0.5, 1, 2, 4, 8.
fn graded_result() -> ValidationResult {
    let targets = catalog::targets(catalog::CROSS_5DEG).unwrap();
    common::run_validation(&targets, common::sequential_config(), |index, pos, now| {
        common::gaze_sample(now, common::offset_dir(pos, 0.5 * (1u32 << index) as f64))
    })
}

#[test]
fn test_default_recompute_reproduces_original_measures() {
    let original = graded_result();
    let rec = original.recompute(&RecomputeOptions::default()).unwrap();

    assert_relative_eq!(
        rec.global.combined.acc,
        original.global.combined.acc,
        epsilon = 1e-9
    );
    for (a, b) in rec.targets.iter().zip(&original.targets) {
        assert_relative_eq!(
            a.measures.combined.acc,
            b.measures.combined.acc,
            epsilon = 1e-9
        );
    }
    assert_eq!(
        rec.window,
        Some(SampleWindow {
            start: 0,
            end: None
        })
    );
    assert_eq!(rec.samples, original.samples);
}

#[test]
fn test_median_aggregation() {
    let original = graded_result();
    // mean of {0.5, 1, 2, 4, 8} is 3.1; the median is 2
    assert_relative_eq!(original.global.combined.acc, 3.1, epsilon = 1e-9);

    let opts = RecomputeOptions {
        agg: stats::median,
        ..Default::default()
    };
    let rec = original.recompute(&opts).unwrap();
    assert_relative_eq!(rec.global.combined.acc, 2.0, epsilon = 1e-9);
}

#[test]
fn test_spatial_filter_drops_targets_from_aggregate_only() {
    let original = graded_result();
    // Keeps the v = 0 targets: indices 0, 1, 3 with acc 0.5, 1, 4
    let opts = RecomputeOptions::default().with_y_eccentricity(1.0);
    let rec = original.recompute(&opts).unwrap();

    assert_relative_eq!(rec.global.combined.acc, 5.5 / 3.0, epsilon = 1e-9);

    // Excluded targets keep their per-target record
    assert_eq!(rec.targets.len(), 5);
    assert_relative_eq!(rec.targets[2].measures.combined.acc, 2.0, epsilon = 1e-9);
    assert_relative_eq!(rec.targets[4].measures.combined.acc, 8.0, epsilon = 1e-9);
}

#[test]
fn test_filter_excluding_every_target_yields_missing_globals() {
    let original = graded_result();
    // All catalog targets sit at 6 m
    let opts = RecomputeOptions::default().with_max_depth(1.0);
    let rec = original.recompute(&opts).unwrap();

    assert_eq!(rec.global.combined.acc, MISSING);
    assert_eq!(rec.global.ipd_mm, MISSING);
    assert_eq!(rec.targets.len(), 5);
    assert_relative_eq!(rec.targets[0].measures.combined.acc, 0.5, epsilon = 1e-9);
}

#[test]
fn test_sample_window_is_recorded() {
    let original = graded_result();
    let opts = RecomputeOptions {
        start_sample: 0,
        end_sample: Some(20),
        ..Default::default()
    };
    let rec = original.recompute(&opts).unwrap();

    // Constant per-target error: a shorter window measures the same
    assert_relative_eq!(rec.global.combined.acc, 3.1, epsilon = 1e-9);
    assert_eq!(
        rec.window,
        Some(SampleWindow {
            start: 0,
            end: Some(20)
        })
    );
    // Raw samples are carried over untouched for further recomputes
    assert_eq!(rec.samples, original.samples);
}

#[test]
fn test_window_past_the_batch_yields_missing_measures() {
    let original = graded_result();
    let opts = RecomputeOptions {
        start_sample: 10_000,
        ..Default::default()
    };
    let rec = original.recompute(&opts).unwrap();

    assert!(rec.targets.iter().all(|t| t.measures.combined.is_missing()));
    assert_eq!(rec.global.combined.acc, MISSING);
}

#[test]
fn test_impossible_filter_range_is_rejected() {
    let original = graded_result();
    let opts = RecomputeOptions {
        tar_x_range: Some((5.0, -5.0)),
        ..Default::default()
    };
    assert!(matches!(
        original.recompute(&opts),
        Err(ValidationError::InvalidRange(_))
    ));
}
