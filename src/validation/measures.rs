//! Per-target measure reduction and cross-target aggregation.
//!
//! One target's post-discard sample batch is reduced into a
//! [`GazeMeasures`] per eye channel plus IPD; the grand aggregate is a
//! field-wise reduction over the per-target measure sets, never over
//! pooled raw samples.

use crate::core::math::{self, GeometryError, Vec3};
use crate::core::types::{Eye, EyeRay, GazeSample, MISSING};
use crate::stats::{self, StatsError};
use serde::{Deserialize, Serialize};

/// Aggregation function applied field-wise across targets.
pub type AggFn = fn(&[f64]) -> Result<f64, StatsError>;

/// Data-quality shortfalls are not errors: a measure that cannot be
/// computed from the available samples becomes `MISSING`.
fn or_missing(r: Result<f64, StatsError>) -> f64 {
    r.unwrap_or(MISSING)
}

/// Accuracy and precision measures for one error series, in degrees.
///
/// Every field defaults to [`MISSING`] so that targets measured with
/// heterogeneous tracker capability keep a uniform shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazeMeasures {
    /// Mean horizontal gaze angle in head space.
    pub avg_x: f64,
    /// Mean vertical gaze angle in head space.
    pub avg_y: f64,
    /// Median horizontal gaze angle.
    pub med_x: f64,
    /// Median vertical gaze angle.
    pub med_y: f64,
    /// Signed mean horizontal gaze-target offset.
    pub off_x: f64,
    /// Signed mean vertical gaze-target offset.
    pub off_y: f64,
    /// Accuracy: mean combined angular error.
    pub acc: f64,
    /// Mean absolute horizontal error.
    pub acc_x: f64,
    /// Mean absolute vertical error.
    pub acc_y: f64,
    /// Median combined angular error.
    pub med_acc: f64,
    /// Median absolute horizontal error.
    pub med_acc_x: f64,
    /// Median absolute vertical error.
    pub med_acc_y: f64,
    /// Precision: population SD of the combined error.
    pub sd: f64,
    /// Population SD of the signed horizontal error.
    pub sd_x: f64,
    /// Population SD of the signed vertical error.
    pub sd_y: f64,
    /// Precision: intersample RMS of the combined error.
    pub rmsi: f64,
    /// Intersample RMS of the signed horizontal error.
    pub rmsi_x: f64,
    /// Intersample RMS of the signed vertical error.
    pub rmsi_y: f64,
}

impl Default for GazeMeasures {
    fn default() -> Self {
        Self::from_array([MISSING; 18])
    }
}

impl GazeMeasures {
    /// Whether no measure could be computed for this channel.
    pub fn is_missing(&self) -> bool {
        self.acc == MISSING
    }

    fn to_array(self) -> [f64; 18] {
        [
            self.avg_x,
            self.avg_y,
            self.med_x,
            self.med_y,
            self.off_x,
            self.off_y,
            self.acc,
            self.acc_x,
            self.acc_y,
            self.med_acc,
            self.med_acc_x,
            self.med_acc_y,
            self.sd,
            self.sd_x,
            self.sd_y,
            self.rmsi,
            self.rmsi_x,
            self.rmsi_y,
        ]
    }

    fn from_array(a: [f64; 18]) -> Self {
        Self {
            avg_x: a[0],
            avg_y: a[1],
            med_x: a[2],
            med_y: a[3],
            off_x: a[4],
            off_y: a[5],
            acc: a[6],
            acc_x: a[7],
            acc_y: a[8],
            med_acc: a[9],
            med_acc_x: a[10],
            med_acc_y: a[11],
            sd: a[12],
            sd_x: a[13],
            sd_y: a[14],
            rmsi: a[15],
            rmsi_x: a[16],
            rmsi_y: a[17],
        }
    }
}

/// Combined plus per-eye measures and IPD, for one target or for the
/// grand aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasureSet {
    /// Measures from the combined (cyclopean) gaze ray.
    pub combined: GazeMeasures,
    /// Left-eye measures, `MISSING` without monocular data.
    pub left: GazeMeasures,
    /// Right-eye measures, `MISSING` without monocular data.
    pub right: GazeMeasures,
    /// Inter-pupillary distance in millimeters, `MISSING` without
    /// monocular data.
    pub ipd_mm: f64,
}

impl Default for MeasureSet {
    fn default() -> Self {
        Self {
            combined: GazeMeasures::default(),
            left: GazeMeasures::default(),
            right: GazeMeasures::default(),
            ipd_mm: MISSING,
        }
    }
}

/// Accumulated per-sample angular error series for one eye channel.
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorSeries {
    delta: Vec<f64>,
    delta_x: Vec<f64>,
    delta_y: Vec<f64>,
    gaze_x: Vec<f64>,
    gaze_y: Vec<f64>,
}

impl ErrorSeries {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            delta: Vec::with_capacity(n),
            delta_x: Vec::with_capacity(n),
            delta_y: Vec::with_capacity(n),
            gaze_x: Vec::with_capacity(n),
            gaze_y: Vec::with_capacity(n),
        }
    }

    /// Compute and accumulate the error of one ray against the target.
    pub(crate) fn push(&mut self, ray: &EyeRay, target: Vec3) -> Result<(), GeometryError> {
        let err = math::gaze_target_error(ray.origin, ray.dir, target)?;
        let (gx, gy) = math::gaze_angles_deg(ray.dir)?;
        self.delta.push(err.total_deg);
        self.delta_x.push(err.h_deg);
        self.delta_y.push(err.v_deg);
        self.gaze_x.push(gx);
        self.gaze_y.push(gy);
        Ok(())
    }

    /// Reduce the series into measures. An empty series yields all
    /// `MISSING`; a single sample yields means/medians but `MISSING`
    /// intersample RMS.
    pub(crate) fn reduce(&self) -> GazeMeasures {
        if self.delta.is_empty() {
            return GazeMeasures::default();
        }

        let abs_x: Vec<f64> = self.delta_x.iter().map(|v| v.abs()).collect();
        let abs_y: Vec<f64> = self.delta_y.iter().map(|v| v.abs()).collect();

        GazeMeasures {
            avg_x: or_missing(stats::mean(&self.gaze_x)),
            avg_y: or_missing(stats::mean(&self.gaze_y)),
            med_x: or_missing(stats::median(&self.gaze_x)),
            med_y: or_missing(stats::median(&self.gaze_y)),
            off_x: or_missing(stats::mean(&self.delta_x)),
            off_y: or_missing(stats::mean(&self.delta_y)),
            acc: or_missing(stats::mean(&self.delta)),
            acc_x: or_missing(stats::mean(&abs_x)),
            acc_y: or_missing(stats::mean(&abs_y)),
            med_acc: or_missing(stats::median(&self.delta)),
            med_acc_x: or_missing(stats::median(&abs_x)),
            med_acc_y: or_missing(stats::median(&abs_y)),
            sd: or_missing(stats::sd(&self.delta)),
            sd_x: or_missing(stats::sd(&self.delta_x)),
            sd_y: or_missing(stats::sd(&self.delta_y)),
            rmsi: or_missing(stats::rmsi(&self.delta)),
            rmsi_x: or_missing(stats::rmsi(&self.delta_x)),
            rmsi_y: or_missing(stats::rmsi(&self.delta_y)),
        }
    }
}

/// Reduce one target's post-discard sample batch into a full measure set.
///
/// Per-eye channels are filled only from samples that carry the eye;
/// geometric failures (zero-length rays, coincident origins) propagate
/// and abort the run.
pub(crate) fn reduce_target(
    samples: &[GazeSample],
    target_pos: Vec3,
) -> Result<MeasureSet, GeometryError> {
    let n = samples.len();
    let mut combined = ErrorSeries::with_capacity(n);
    let mut left = ErrorSeries::with_capacity(n);
    let mut right = ErrorSeries::with_capacity(n);
    let mut ipd_mm: Vec<f64> = Vec::new();

    for s in samples {
        combined.push(&s.combined, target_pos)?;
        if let Some(ray) = s.eye(Eye::Left) {
            left.push(ray, target_pos)?;
        }
        if let Some(ray) = s.eye(Eye::Right) {
            right.push(ray, target_pos)?;
        }
        if let (Some(l), Some(r)) = (&s.left, &s.right) {
            // Tracker scale is meters; IPD is reported in millimeters.
            ipd_mm.push((r.origin.x - l.origin.x).abs() * 1000.0);
        }
    }

    Ok(MeasureSet {
        combined: combined.reduce(),
        left: left.reduce(),
        right: right.reduce(),
        ipd_mm: or_missing(stats::mean(&ipd_mm)),
    })
}

/// Field-wise aggregate of per-target measures.
///
/// `MISSING` entries are excluded per field; a field missing everywhere
/// stays `MISSING`. Errors from the aggregation function propagate.
pub(crate) fn aggregate_measures(
    items: &[GazeMeasures],
    agg: AggFn,
) -> Result<GazeMeasures, StatsError> {
    let arrays: Vec<[f64; 18]> = items.iter().map(|m| m.to_array()).collect();
    let mut out = [MISSING; 18];
    for (i, slot) in out.iter_mut().enumerate() {
        let vals: Vec<f64> = arrays.iter().map(|a| a[i]).filter(|v| *v != MISSING).collect();
        if !vals.is_empty() {
            *slot = agg(&vals)?;
        }
    }
    Ok(GazeMeasures::from_array(out))
}

/// Aggregate full measure sets across targets (unweighted, per field).
pub(crate) fn aggregate_sets(items: &[MeasureSet], agg: AggFn) -> Result<MeasureSet, StatsError> {
    let combined: Vec<GazeMeasures> = items.iter().map(|s| s.combined).collect();
    let left: Vec<GazeMeasures> = items.iter().map(|s| s.left).collect();
    let right: Vec<GazeMeasures> = items.iter().map(|s| s.right).collect();
    let ipds: Vec<f64> = items
        .iter()
        .map(|s| s.ipd_mm)
        .filter(|v| *v != MISSING)
        .collect();

    Ok(MeasureSet {
        combined: aggregate_measures(&combined, agg)?,
        left: aggregate_measures(&left, agg)?,
        right: aggregate_measures(&right, agg)?,
        ipd_mm: if ipds.is_empty() {
            MISSING
        } else {
            agg(&ipds)?
        },
    })
}
