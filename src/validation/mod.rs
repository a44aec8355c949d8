//! Validation pipeline: sequencer, per-target reduction, result
//! containers, recompute, and the gaze-source seam.

pub mod measures;
pub mod recompute;
pub mod result;
pub mod sequencer;
pub mod source;

pub use measures::{AggFn, GazeMeasures, MeasureSet};
pub use recompute::RecomputeOptions;
pub use result::{Metadata, SampleWindow, TargetResult, ValidationResult};
pub use sequencer::{Phase, ResolvedTarget, SequencerCommand, ValidationSequencer};
pub use source::{GazeSource, ReplaySource};

use crate::config::ValidationConfig;
use crate::core::types::GazeSample;
use crate::error::ValidationError;
use crate::stats;
use crate::targets::Target;

/// Drive a complete validation run offline from a replayed gaze source.
///
/// Ticks the sequencer at the configured frame interval and feeds it one
/// source sample per sampling-phase tick, mirroring a frame-paced live
/// run. Used for session replay and batch re-validation of recordings.
pub fn run_offline(
    source: &mut dyn GazeSource,
    targets: &[Target],
    config: &ValidationConfig,
    metadata: Metadata,
) -> Result<ValidationResult, ValidationError> {
    let mut seq = ValidationSequencer::new(targets, config.clone())?;
    log::debug!(
        "offline run: monocular={}, frame interval {:.2} ms",
        source.has_monocular_data(),
        config.frame_interval_ms
    );

    let mut now = 0.0;
    loop {
        if seq.tick(now)? == SequencerCommand::Finished {
            break;
        }
        if seq.is_sampling() {
            if let Some(sample) = source.next_sample() {
                seq.push_sample(sample);
            }
        }
        now += config.frame_interval_ms;
    }
    seq.finish(metadata)
}

/// Inter-pupillary distance over a sample batch: mean absolute horizontal
/// separation between the left and right eye origins, in millimeters.
///
/// Fails when the batch carries no monocular eye origins; this is a
/// capability error raised at the point of use, so binocular-only and
/// monocular trackers can be mixed across calls.
pub fn measure_ipd(samples: &[GazeSample]) -> Result<f64, ValidationError> {
    let separations: Vec<f64> = samples
        .iter()
        .filter_map(|s| match (&s.left, &s.right) {
            (Some(l), Some(r)) => Some((r.origin.x - l.origin.x).abs() * 1000.0),
            _ => None,
        })
        .collect();

    if separations.is_empty() {
        return Err(ValidationError::MissingCapability(
            "IPD measurement requires monocular eye origins",
        ));
    }
    Ok(stats::mean(&separations)?)
}
