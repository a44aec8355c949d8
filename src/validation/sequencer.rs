//! Tick-driven validation sequencer.
//!
//! One sequencer owns one validation run. The host drives it with one
//! [`tick`](ValidationSequencer::tick) per display frame and pushes gaze
//! samples as they arrive (push model, no polling); the sequencer answers
//! each tick with a [`SequencerCommand`] telling the host what to do with
//! the target marker. The core has no knowledge of rendering.
//!
//! Phases per run:
//!
//! ```text
//! SETUP -> (per target: SETTLE -> SAMPLING -> FEEDBACK) -> DONE
//! ```
//!
//! Targets are strictly sequential; a target's sample batch is flushed
//! into its result before the next target's settle period begins.

use super::measures;
use super::result::{Metadata, TargetResult, ValidationResult};
use crate::config::ValidationConfig;
use crate::core::math::Vec3;
use crate::core::types::GazeSample;
use crate::error::ValidationError;
use crate::stats;
use crate::targets::Target;
use rand::seq::SliceRandom;

/// Sequencer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Run created, first tick pending.
    Setup,
    /// Waiting out the inter-target delay, no target visible.
    Settle,
    /// Target visible, accumulating samples.
    Sampling,
    /// Target measured, brief fixation feedback.
    Feedback,
    /// All targets measured; call [`ValidationSequencer::finish`].
    Done,
}

/// Host directive returned by [`ValidationSequencer::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequencerCommand {
    /// Nothing to do this frame.
    Continue,
    /// Show the target marker at `position` in the head-locked frame.
    ShowTarget {
        /// Target index in the caller-supplied list.
        index: usize,
        /// Resolved marker position (meters).
        position: Vec3,
    },
    /// Give brief fixation feedback on the marker (e.g. recolor it).
    Feedback {
        /// Target index in the caller-supplied list.
        index: usize,
    },
    /// Hide the target marker.
    HideTarget {
        /// Target index in the caller-supplied list.
        index: usize,
    },
    /// The run is complete.
    Finished,
}

/// A target with its resolved position, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTarget {
    /// Index in the caller-supplied target list.
    pub index: usize,
    /// The target specification.
    pub target: Target,
    /// Resolved position in the head-locked frame.
    pub position: Vec3,
}

/// State machine for one validation run.
///
/// The gaze-reading resource is exclusively owned by one in-flight
/// sequencer; starting a second run while one is active is a caller
/// error. Cancellation is external: stop ticking and drop the sequencer.
pub struct ValidationSequencer {
    config: ValidationConfig,
    order: Vec<ResolvedTarget>,
    current: usize,
    phase: Phase,
    phase_start_ms: f64,
    batch: Vec<GazeSample>,
    targets_out: Vec<TargetResult>,
    samples_out: Vec<Vec<GazeSample>>,
}

impl ValidationSequencer {
    /// Resolve every target and set up a run, optionally shuffling the
    /// presentation order. Fails fast on invalid targets.
    pub fn new(targets: &[Target], config: ValidationConfig) -> Result<Self, ValidationError> {
        if targets.is_empty() {
            return Err(ValidationError::NoTargets);
        }

        let mut order = Vec::with_capacity(targets.len());
        for (index, &target) in targets.iter().enumerate() {
            let position = target.position()?;
            order.push(ResolvedTarget {
                index,
                target,
                position,
            });
        }
        if config.randomize {
            order.shuffle(&mut rand::rng());
        }

        log::debug!(
            "validation run: {} targets, randomize={}",
            order.len(),
            config.randomize
        );

        let n = order.len();
        Ok(Self {
            config,
            order,
            current: 0,
            phase: Phase::Setup,
            phase_start_ms: 0.0,
            batch: Vec::new(),
            targets_out: Vec::with_capacity(n),
            samples_out: Vec::with_capacity(n),
        })
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether samples pushed right now will be accumulated.
    pub fn is_sampling(&self) -> bool {
        self.phase == Phase::Sampling
    }

    /// The target currently being presented (settle through feedback).
    pub fn current_target(&self) -> Option<&ResolvedTarget> {
        match self.phase {
            Phase::Settle | Phase::Sampling | Phase::Feedback => self.order.get(self.current),
            _ => None,
        }
    }

    /// Deliver one gaze sample. Accepted only while sampling; stray
    /// samples outside the window are dropped.
    pub fn push_sample(&mut self, sample: GazeSample) {
        if self.phase == Phase::Sampling {
            self.batch.push(sample);
        }
    }

    /// Advance the state machine to `now_ms` (any monotonic clock in
    /// milliseconds). Call once per display frame.
    pub fn tick(&mut self, now_ms: f64) -> Result<SequencerCommand, ValidationError> {
        let elapsed = now_ms - self.phase_start_ms;
        match self.phase {
            Phase::Setup => {
                self.enter(Phase::Settle, now_ms);
                Ok(SequencerCommand::Continue)
            }

            Phase::Settle => {
                if elapsed < self.config.settle_ms {
                    return Ok(SequencerCommand::Continue);
                }
                let rt = self.order[self.current];
                self.batch = Vec::with_capacity(256);
                self.enter(Phase::Sampling, now_ms);
                log::debug!(
                    "target {} on: ({:+.1}, {:+.1}) deg at {:.1} m",
                    rt.index,
                    rt.target.h_deg,
                    rt.target.v_deg,
                    rt.target.depth_m
                );
                Ok(SequencerCommand::ShowTarget {
                    index: rt.index,
                    position: rt.position,
                })
            }

            Phase::Sampling => {
                if elapsed < self.config.sample_dur_ms {
                    return Ok(SequencerCommand::Continue);
                }
                // Flush this target's batch before anything else runs.
                self.reduce_current()?;
                let index = self.order[self.current].index;
                self.enter(Phase::Feedback, now_ms);
                Ok(SequencerCommand::Feedback { index })
            }

            Phase::Feedback => {
                if elapsed < self.config.feedback_ms {
                    return Ok(SequencerCommand::Continue);
                }
                let index = self.order[self.current].index;
                self.current += 1;
                if self.current == self.order.len() {
                    self.phase = Phase::Done;
                    log::info!("validation run complete ({} targets)", self.order.len());
                } else {
                    self.enter(Phase::Settle, now_ms);
                }
                Ok(SequencerCommand::HideTarget { index })
            }

            Phase::Done => Ok(SequencerCommand::Finished),
        }
    }

    fn enter(&mut self, phase: Phase, now_ms: f64) {
        self.phase = phase;
        self.phase_start_ms = now_ms;
    }

    /// Reduce the current target's batch into a result record.
    fn reduce_current(&mut self) -> Result<(), ValidationError> {
        let rt = self.order[self.current];
        let batch = std::mem::take(&mut self.batch);

        // Fixed settle-window heuristic carried over from the legacy
        // toolbox; a real fixation detector could replace it.
        let discard = self.config.discard_samples.min(batch.len());
        let kept: Vec<GazeSample> = batch.into_iter().skip(discard).collect();
        if kept.len() < 2 {
            log::warn!(
                "target {}: only {} samples after settle discard, measures will be MISSING",
                rt.index,
                kept.len()
            );
        }

        let measures = measures::reduce_target(&kept, rt.position)?;
        log::debug!(
            "target {} done: acc={:.2} sd={:.2} rmsi={:.2} ({} samples)",
            rt.index,
            measures.combined.acc,
            measures.combined.sd,
            measures.combined.rmsi,
            kept.len()
        );

        self.targets_out.push(TargetResult {
            index: rt.index,
            target: rt.target,
            position: rt.position,
            measures,
        });
        self.samples_out.push(kept);
        Ok(())
    }

    /// Aggregate and return the run result. Only valid once every target
    /// has been measured; an interrupted run yields no partial result.
    pub fn finish(self, metadata: Metadata) -> Result<ValidationResult, ValidationError> {
        if self.phase != Phase::Done {
            return Err(ValidationError::RunIncomplete {
                completed: self.targets_out.len(),
                total: self.order.len(),
            });
        }

        let sets: Vec<_> = self.targets_out.iter().map(|t| t.measures).collect();
        let global = measures::aggregate_sets(&sets, stats::mean)?;

        let mut meta = default_metadata();
        meta.extend(metadata);

        ValidationResult::new(meta, global, self.targets_out, self.samples_out)
    }
}

/// Base metadata attached to every result; caller entries override.
fn default_metadata() -> Metadata {
    let mut meta = Metadata::new();
    let unix_s = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    meta.insert("timestamp_unix_s".into(), unix_s.to_string());
    meta.insert("label".into(), "validation".into());
    meta.insert("toolbox_version".into(), env!("CARGO_PKG_VERSION").into());
    meta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EyeRay;
    use crate::targets::catalog;

    fn config() -> ValidationConfig {
        ValidationConfig {
            randomize: false,
            ..Default::default()
        }
    }

    fn perfect_sample(now: f64, position: Vec3) -> GazeSample {
        let dir = position.normalized().unwrap();
        GazeSample::binocular(now, now as u64, EyeRay::new(Vec3::ZERO, dir))
    }

    #[test]
    fn test_empty_target_list_rejected() {
        assert!(matches!(
            ValidationSequencer::new(&[], config()),
            Err(ValidationError::NoTargets)
        ));
    }

    #[test]
    fn test_invalid_target_fails_at_setup() {
        let bad = Target {
            h_deg: 0.0,
            v_deg: 0.0,
            depth_m: -1.0,
        };
        assert!(matches!(
            ValidationSequencer::new(&[bad], config()),
            Err(ValidationError::Target(_))
        ));
    }

    #[test]
    fn test_phase_progression_single_target() {
        let targets = catalog::targets(catalog::CENTER).unwrap();
        let mut seq = ValidationSequencer::new(&targets, config()).unwrap();
        assert_eq!(seq.phase(), Phase::Setup);

        assert_eq!(seq.tick(0.0).unwrap(), SequencerCommand::Continue);
        assert_eq!(seq.phase(), Phase::Settle);

        // Settle has not elapsed yet
        assert_eq!(seq.tick(500.0).unwrap(), SequencerCommand::Continue);

        // Settle elapsed: target appears, sampling starts
        let cmd = seq.tick(1000.0).unwrap();
        assert!(matches!(cmd, SequencerCommand::ShowTarget { index: 0, .. }));
        assert!(seq.is_sampling());

        // Feed samples over the sampling window
        let pos = seq.current_target().unwrap().position;
        let mut now = 1000.0;
        while now < 3000.0 {
            seq.push_sample(perfect_sample(now, pos));
            now += 10.0;
            if seq.tick(now).unwrap() == (SequencerCommand::Feedback { index: 0 }) {
                break;
            }
        }
        assert_eq!(seq.phase(), Phase::Feedback);

        // Feedback elapses, marker hidden, run done
        assert_eq!(
            seq.tick(now + 200.0).unwrap(),
            SequencerCommand::HideTarget { index: 0 }
        );
        assert_eq!(seq.phase(), Phase::Done);
        assert_eq!(seq.tick(now + 210.0).unwrap(), SequencerCommand::Finished);

        let result = seq.finish(Metadata::new()).unwrap();
        assert_eq!(result.targets.len(), 1);
        assert_eq!(result.samples.len(), 1);
    }

    #[test]
    fn test_stray_samples_dropped_outside_sampling() {
        let targets = catalog::targets(catalog::CENTER).unwrap();
        let mut seq = ValidationSequencer::new(&targets, config()).unwrap();
        seq.tick(0.0).unwrap();
        // Still settling: this sample must not be recorded
        seq.push_sample(perfect_sample(10.0, Vec3::FORWARD));
        assert_eq!(seq.batch.len(), 0);
    }

    #[test]
    fn test_finish_before_done_is_error() {
        let targets = catalog::targets(catalog::CENTER).unwrap();
        let mut seq = ValidationSequencer::new(&targets, config()).unwrap();
        seq.tick(0.0).unwrap();
        assert!(matches!(
            seq.finish(Metadata::new()),
            Err(ValidationError::RunIncomplete {
                completed: 0,
                total: 1
            })
        ));
    }

    #[test]
    fn test_metadata_defaults_and_override() {
        let targets = catalog::targets(catalog::CENTER).unwrap();
        let mut seq = ValidationSequencer::new(&targets, config()).unwrap();
        let mut now = 0.0;
        loop {
            if seq.tick(now).unwrap() == SequencerCommand::Finished {
                break;
            }
            now += 10.0;
        }
        let mut meta = Metadata::new();
        meta.insert("label".into(), "drift-check".into());
        meta.insert("participant".into(), "p01".into());
        let result = seq.finish(meta).unwrap();
        assert_eq!(result.metadata["label"], "drift-check");
        assert_eq!(result.metadata["participant"], "p01");
        assert!(result.metadata.contains_key("toolbox_version"));
    }
}
