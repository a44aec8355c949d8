//! End-to-end validation runs with synthetic gaze of known error.

mod common;

use approx::assert_relative_eq;
use drishti::{catalog, ValidationConfig, ValidationResult, MISSING};

#[test]
fn test_perfect_fixation_yields_zero_error() {
    let targets = catalog::targets(catalog::CENTER).unwrap();
    let result = common::run_validation(&targets, common::sequential_config(), |_, pos, now| {
        common::perfect_sample(now, pos)
    });

    assert_eq!(result.targets.len(), 1);
    assert_eq!(result.samples.len(), 1);
    assert_eq!(result.samples[0].len(), 180);

    let g = &result.global.combined;
    assert_relative_eq!(g.acc, 0.0, epsilon = 1e-9);
    assert_relative_eq!(g.off_x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(g.off_y, 0.0, epsilon = 1e-9);
    assert_relative_eq!(g.sd, 0.0, epsilon = 1e-9);
    assert_relative_eq!(g.rmsi, 0.0, epsilon = 1e-9);

    // Combined-only source: no per-eye measures, no IPD
    assert!(result.global.left.is_missing());
    assert!(result.global.right.is_missing());
    assert_eq!(result.global.ipd_mm, MISSING);

    assert!(result.metadata.contains_key("toolbox_version"));
    assert!(result.metadata.contains_key("timestamp_unix_s"));
}

#[test]
fn test_uniform_offset_measured_on_every_target() {
    let targets = catalog::targets(catalog::CROSS_5DEG).unwrap();
    let result = common::run_validation(&targets, common::sequential_config(), |_, pos, now| {
        common::gaze_sample(now, common::offset_dir(pos, 1.0))
    });

    for tar in &result.targets {
        let m = &tar.measures.combined;
        assert_relative_eq!(m.acc, 1.0, epsilon = 1e-9);
        assert_relative_eq!(m.med_acc, 1.0, epsilon = 1e-9);
        // Constant error: zero variability on both precision measures
        assert_relative_eq!(m.sd, 0.0, epsilon = 1e-9);
        assert_relative_eq!(m.rmsi, 0.0, epsilon = 1e-9);
    }
    assert_relative_eq!(result.global.combined.acc, 1.0, epsilon = 1e-9);
}

#[test]
fn test_global_is_unweighted_mean_of_targets() {
    let targets = catalog::targets(catalog::CROSS_5DEG).unwrap();
    let result = common::run_validation(&targets, common::sequential_config(), |index, pos, now| {
        common::gaze_sample(now, common::offset_dir(pos, (index + 1) as f64))
    });

    for tar in &result.targets {
        assert_relative_eq!(
            tar.measures.combined.acc,
            (tar.index + 1) as f64,
            epsilon = 1e-9
        );
    }
    // (1 + 2 + 3 + 4 + 5) / 5
    assert_relative_eq!(result.global.combined.acc, 3.0, epsilon = 1e-9);
}

#[test]
fn test_signed_decomposition_on_central_target() {
    let targets = catalog::targets(catalog::CENTER).unwrap();
    // Gaze constantly 1 degree right of fixation
    let result = common::run_validation(&targets, common::sequential_config(), |_, _, now| {
        common::gaze_sample(now, common::unit_from_angles(1.0, 0.0))
    });

    let m = &result.targets[0].measures.combined;
    assert_relative_eq!(m.acc, 1.0, epsilon = 1e-9);
    assert_relative_eq!(m.off_x, 1.0, epsilon = 1e-9);
    assert_relative_eq!(m.off_y, 0.0, epsilon = 1e-9);
    assert_relative_eq!(m.acc_x, 1.0, epsilon = 1e-9);
    assert_relative_eq!(m.acc_y, 0.0, epsilon = 1e-9);
    assert_relative_eq!(m.avg_x, 1.0, epsilon = 1e-9);
    assert_relative_eq!(m.avg_y, 0.0, epsilon = 1e-9);
    assert_relative_eq!(m.med_x, 1.0, epsilon = 1e-9);
}

#[test]
fn test_precision_of_alternating_horizontal_jitter() {
    let targets = catalog::targets(catalog::CENTER).unwrap();
    // Gaze alternates between 0.5 degrees left and right every sample
    let result = common::run_validation(&targets, common::sequential_config(), |_, _, now| {
        let side = if ((now / 10.0) as i64) % 2 == 0 { 0.5 } else { -0.5 };
        common::gaze_sample(now, common::unit_from_angles(side, 0.0))
    });

    let m = &result.targets[0].measures.combined;
    // Signed horizontal error is +/-0.5 with mean zero
    assert_relative_eq!(m.off_x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(m.sd_x, 0.5, epsilon = 1e-9);
    assert_relative_eq!(m.rmsi_x, 1.0, epsilon = 1e-9);
    // Total error magnitude is a constant 0.5: accurate-ish but with
    // all the variability in the signed component
    assert_relative_eq!(m.acc, 0.5, epsilon = 1e-9);
    assert_relative_eq!(m.acc_x, 0.5, epsilon = 1e-9);
    assert_relative_eq!(m.sd, 0.0, epsilon = 1e-9);
    assert_relative_eq!(m.rmsi, 0.0, epsilon = 1e-9);
}

#[test]
fn test_monocular_source_fills_per_eye_measures_and_ipd() {
    let targets = catalog::targets(catalog::CENTER).unwrap();
    let result = common::run_validation(&targets, common::sequential_config(), |_, pos, now| {
        common::monocular_sample(now, pos, 64.0)
    });

    let set = &result.targets[0].measures;
    assert!(!set.left.is_missing());
    assert!(!set.right.is_missing());
    // Each eye fixates from its own origin, so per-eye error is zero too
    assert_relative_eq!(set.left.acc, 0.0, epsilon = 1e-9);
    assert_relative_eq!(set.right.acc, 0.0, epsilon = 1e-9);
    assert_relative_eq!(set.ipd_mm, 64.0, epsilon = 1e-9);
    assert_relative_eq!(result.global.ipd_mm, 64.0, epsilon = 1e-9);

    assert_relative_eq!(
        drishti::measure_ipd(&result.samples[0]).unwrap(),
        64.0,
        epsilon = 1e-9
    );
}

#[test]
fn test_randomized_run_still_covers_every_target() {
    let targets = catalog::targets(catalog::CROSS_5DEG).unwrap();
    let config = ValidationConfig::default();
    assert!(config.randomize);
    let result = common::run_validation(&targets, config, |_, pos, now| {
        common::perfect_sample(now, pos)
    });

    let mut indices: Vec<usize> = result.targets.iter().map(|t| t.index).collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    assert!(result.samples.iter().all(|batch| batch.len() == 180));
    assert_relative_eq!(result.global.combined.acc, 0.0, epsilon = 1e-9);
}

#[test]
fn test_result_persistence_round_trips() {
    let targets = catalog::targets(catalog::CENTER).unwrap();
    let result = common::run_validation(&targets, common::sequential_config(), |_, pos, now| {
        common::gaze_sample(now, common::offset_dir(pos, 1.0))
    });

    let dir = tempfile::tempdir().unwrap();

    let bin = dir.path().join("run.vres");
    result.save(&bin).unwrap();
    assert_eq!(ValidationResult::load(&bin).unwrap(), result);

    let json = dir.path().join("run.json");
    result.to_json_file(&json).unwrap();
    assert_eq!(ValidationResult::from_json_file(&json).unwrap(), result);

    assert!(result.summary().starts_with("Validation Result: Acc: 1.00"));
}
