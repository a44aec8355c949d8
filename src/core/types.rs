//! Core data types shared across the validation pipeline.

use super::math::Vec3;
use serde::{Deserialize, Serialize};

/// Sentinel for measures that could not be computed.
///
/// Kept from the legacy toolbox file format, which could not encode NaN.
/// Measures are set to this value rather than omitted so that runs with
/// heterogeneous tracker capability stay uniform in shape.
pub const MISSING: f64 = -99999.0;

/// Eye selector for monocular data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eye {
    /// Left eye.
    Left,
    /// Right eye.
    Right,
}

impl Eye {
    /// Both eyes, left first.
    pub const BOTH: [Eye; 2] = [Eye::Left, Eye::Right];
}

/// One gaze ray: eye origin plus direction, in the head-locked frame.
///
/// The direction is not required to be unit length; the error model
/// normalizes before use since not all sources guarantee it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeRay {
    /// Eye origin position (meters).
    pub origin: Vec3,
    /// Gaze direction.
    pub dir: Vec3,
}

impl EyeRay {
    /// Create a ray from origin and direction.
    #[inline]
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}

/// One instantaneous gaze observation delivered by a gaze source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazeSample {
    /// Sample timestamp in milliseconds.
    pub time_ms: f64,
    /// Display frame number at capture time.
    pub frame: u64,
    /// Combined (cyclopean) gaze ray. Always present.
    pub combined: EyeRay,
    /// Left eye ray, when the tracker delivers monocular data.
    pub left: Option<EyeRay>,
    /// Right eye ray, when the tracker delivers monocular data.
    pub right: Option<EyeRay>,
    /// Pupil diameter in millimeters, when available.
    pub pupil_diameter_mm: Option<f64>,
}

impl GazeSample {
    /// Create a combined-only (binocular) sample.
    pub fn binocular(time_ms: f64, frame: u64, combined: EyeRay) -> Self {
        Self {
            time_ms,
            frame,
            combined,
            left: None,
            right: None,
            pupil_diameter_mm: None,
        }
    }

    /// The ray for one eye, if the sample carries it.
    pub fn eye(&self, eye: Eye) -> Option<&EyeRay> {
        match eye {
            Eye::Left => self.left.as_ref(),
            Eye::Right => self.right.as_ref(),
        }
    }

    /// Whether both per-eye rays are present (needed for IPD).
    pub fn has_monocular(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }
}
