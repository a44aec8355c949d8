//! Re-derive validation metrics from retained raw samples.
//!
//! A recompute replays the per-target reduction over a different sample
//! window and/or restricts which targets feed the global aggregate.
//! Spatially excluded targets keep their per-target record; they only
//! drop out of the aggregate. The source result is never mutated.

use super::measures::{self, AggFn, MeasureSet};
use super::result::{SampleWindow, TargetResult, ValidationResult};
use crate::error::ValidationError;
use crate::stats;
use crate::targets::Target;

/// Options for [`ValidationResult::recompute`].
#[derive(Debug, Clone, Copy)]
pub struct RecomputeOptions {
    /// First sample index to use per target (into the post-discard
    /// batches).
    pub start_sample: usize,
    /// One past the last sample index, `None` for the full batch.
    pub end_sample: Option<usize>,
    /// Inclusive (min, max) horizontal target range in degrees; targets
    /// outside are excluded from the global aggregate.
    pub tar_x_range: Option<(f64, f64)>,
    /// Inclusive (min, max) vertical target range in degrees.
    pub tar_y_range: Option<(f64, f64)>,
    /// Inclusive (min, max) target depth range in meters.
    pub depth_range: Option<(f64, f64)>,
    /// Aggregation function applied field-wise across included targets.
    pub agg: AggFn,
}

impl Default for RecomputeOptions {
    fn default() -> Self {
        Self {
            start_sample: 0,
            end_sample: None,
            tar_x_range: None,
            tar_y_range: None,
            depth_range: None,
            agg: stats::mean,
        }
    }
}

impl RecomputeOptions {
    /// Restrict to targets within a symmetric horizontal eccentricity.
    pub fn with_x_eccentricity(mut self, deg: f64) -> Self {
        self.tar_x_range = Some((-deg, deg));
        self
    }

    /// Restrict to targets within a symmetric vertical eccentricity.
    pub fn with_y_eccentricity(mut self, deg: f64) -> Self {
        self.tar_y_range = Some((-deg, deg));
        self
    }

    /// Restrict to targets no deeper than `depth_m`.
    pub fn with_max_depth(mut self, depth_m: f64) -> Self {
        self.depth_range = Some((0.0, depth_m));
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        for (name, range) in [
            ("tar_x_range", self.tar_x_range),
            ("tar_y_range", self.tar_y_range),
            ("depth_range", self.depth_range),
        ] {
            if let Some((lo, hi)) = range {
                if lo > hi {
                    return Err(ValidationError::InvalidRange(format!(
                        "{} min {} exceeds max {}",
                        name, lo, hi
                    )));
                }
            }
        }
        if let Some((lo, hi)) = self.depth_range {
            if lo < 0.0 || hi < 0.0 {
                return Err(ValidationError::InvalidRange(
                    "depth_range values cannot be negative".to_string(),
                ));
            }
        }
        if let Some(end) = self.end_sample {
            if end < self.start_sample {
                return Err(ValidationError::InvalidRange(format!(
                    "end_sample {} precedes start_sample {}",
                    end, self.start_sample
                )));
            }
        }
        Ok(())
    }

    fn includes(&self, t: &Target) -> bool {
        let in_range = |range: Option<(f64, f64)>, v: f64| match range {
            Some((lo, hi)) => v >= lo && v <= hi,
            None => true,
        };
        in_range(self.tar_x_range, t.h_deg)
            && in_range(self.tar_y_range, t.v_deg)
            && in_range(self.depth_range, t.depth_m)
    }
}

impl ValidationResult {
    /// Recompute target and global measures from the retained raw
    /// samples under the given options, returning a new result.
    ///
    /// An impossible filter range aborts the call; a spatial filter that
    /// excludes every target yields `MISSING` global measures rather than
    /// failing, so unattended batch analysis can proceed.
    pub fn recompute(&self, opts: &RecomputeOptions) -> Result<ValidationResult, ValidationError> {
        opts.validate()?;

        let mut targets_out = Vec::with_capacity(self.targets.len());
        let mut included: Vec<MeasureSet> = Vec::with_capacity(self.targets.len());

        for (tar, sam) in self.targets.iter().zip(&self.samples) {
            let end = opts.end_sample.unwrap_or(sam.len()).min(sam.len());
            let window: &[_] = if opts.start_sample < end {
                &sam[opts.start_sample..end]
            } else {
                &[]
            };

            let measures = measures::reduce_target(window, tar.position)?;
            let out = TargetResult {
                measures,
                ..tar.clone()
            };
            if opts.includes(&out.target) {
                included.push(out.measures);
            }
            targets_out.push(out);
        }

        let global = if included.is_empty() {
            MeasureSet::default()
        } else {
            measures::aggregate_sets(&included, opts.agg)?
        };

        let mut result = ValidationResult::new(
            self.metadata.clone(),
            global,
            targets_out,
            self.samples.clone(),
        )?;
        result.window = Some(SampleWindow {
            start: opts.start_sample,
            end: opts.end_sample,
        });
        Ok(result)
    }
}
