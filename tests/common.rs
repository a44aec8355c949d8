//! Shared helpers for the validation pipeline tests.
//!
//! Synthetic gaze generators with exactly known angular error, plus a
//! driver that runs a full sequencer session on a fixed 10 ms tick.

#![allow(dead_code)]

use drishti::{
    EyeRay, GazeSample, Metadata, SequencerCommand, Target, ValidationConfig, ValidationResult,
    ValidationSequencer, Vec3,
};

/// Non-randomized config so presentation order matches the target list.
pub fn sequential_config() -> ValidationConfig {
    ValidationConfig {
        randomize: false,
        ..Default::default()
    }
}

/// Unit direction at the given head-space angles (degrees, positive
/// right and up).
pub fn unit_from_angles(h_deg: f64, v_deg: f64) -> Vec3 {
    let (h, v) = (h_deg.to_radians(), v_deg.to_radians());
    Vec3::new(v.cos() * h.sin(), v.sin(), v.cos() * h.cos())
}

/// Rotate the direction toward `target_pos` by exactly `angle_deg`
/// about a perpendicular axis (Rodrigues), giving a gaze direction with
/// a known total angular error against that target.
pub fn offset_dir(target_pos: Vec3, angle_deg: f64) -> Vec3 {
    let dir = target_pos.normalized().unwrap();
    let axis = dir.cross(Vec3::new(0.0, 1.0, 0.0)).normalized().unwrap();
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    dir * cos + axis.cross(dir) * sin + axis * (axis.dot(dir) * (1.0 - cos))
}

/// Combined-only sample looking along `dir` from the head origin.
pub fn gaze_sample(time_ms: f64, dir: Vec3) -> GazeSample {
    GazeSample::binocular(time_ms, (time_ms / 10.0) as u64, EyeRay::new(Vec3::ZERO, dir))
}

/// Sample fixating the target exactly.
pub fn perfect_sample(time_ms: f64, target_pos: Vec3) -> GazeSample {
    gaze_sample(time_ms, target_pos.normalized().unwrap())
}

/// Sample with per-eye rays from origins at +/- half the given IPD,
/// each eye fixating the target exactly from its own origin.
pub fn monocular_sample(time_ms: f64, target_pos: Vec3, ipd_mm: f64) -> GazeSample {
    let half = ipd_mm / 2000.0;
    let mut s = perfect_sample(time_ms, target_pos);
    for (sign, slot) in [(-1.0, &mut s.left), (1.0, &mut s.right)] {
        let origin = Vec3::new(sign * half, 0.0, 0.0);
        let dir = (target_pos - origin).normalized().unwrap();
        *slot = Some(EyeRay::new(origin, dir));
    }
    s
}

/// Drive a complete run on a 10 ms tick, feeding one synthetic sample
/// per sampling-phase tick. `sample_for(index, position, now_ms)`
/// supplies the gaze for the target currently shown.
///
/// With the default timing this yields 200 raw samples per target, 180
/// after the settle discard.
pub fn run_validation<F>(
    targets: &[Target],
    config: ValidationConfig,
    sample_for: F,
) -> ValidationResult
where
    F: Fn(usize, Vec3, f64) -> GazeSample,
{
    let mut seq = ValidationSequencer::new(targets, config).unwrap();
    let mut now = 0.0;
    loop {
        if seq.tick(now).unwrap() == SequencerCommand::Finished {
            break;
        }
        if seq.is_sampling() {
            let (index, position) = {
                let rt = seq.current_target().unwrap();
                (rt.index, rt.position)
            };
            seq.push_sample(sample_for(index, position, now));
        }
        now += 10.0;
    }
    seq.finish(Metadata::new()).unwrap()
}
