//! Validation target specification and geometry.
//!
//! A [`Target`] is an angular offset pair plus a viewing depth. Resolving
//! a target yields the 3D point where a ray cast at those angles pierces
//! the depth plane, using the exact rotation rather than the historical
//! `depth * tan(angle)` per-axis shortcut (which biases multi-target
//! arrays at larger eccentricities).

pub mod catalog;

use crate::core::math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from target construction and resolution.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TargetError {
    /// Target depth must be strictly positive.
    #[error("target depth must be positive, got {0}")]
    NonPositiveDepth(f64),

    /// Angular offsets beyond +/-90 degrees cannot intersect the depth
    /// plane in front of the observer.
    #[error("target offset ({0}, {1}) deg cannot be placed on a forward depth plane")]
    OffsetOutOfRange(f64, f64),
}

/// One fixation point for validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Horizontal offset in visual degrees, positive right.
    pub h_deg: f64,
    /// Vertical offset in visual degrees, positive up.
    pub v_deg: f64,
    /// Viewing depth in meters.
    pub depth_m: f64,
}

impl Target {
    /// Create a target, failing fast on an invalid specification.
    pub fn new(h_deg: f64, v_deg: f64, depth_m: f64) -> Result<Self, TargetError> {
        let t = Self {
            h_deg,
            v_deg,
            depth_m,
        };
        t.validate()?;
        Ok(t)
    }

    /// Check the target invariants (fields are public, so consumers that
    /// receive externally built values re-validate at the point of use).
    pub fn validate(&self) -> Result<(), TargetError> {
        if !(self.depth_m > 0.0) || !self.depth_m.is_finite() {
            return Err(TargetError::NonPositiveDepth(self.depth_m));
        }
        if self.h_deg.abs() >= 90.0 || self.v_deg.abs() >= 90.0 {
            return Err(TargetError::OffsetOutOfRange(self.h_deg, self.v_deg));
        }
        Ok(())
    }

    /// Resolve the target onto the plane perpendicular to the viewing
    /// axis at `depth_m`, in the head-locked frame.
    ///
    /// A unit ray at the given angles is scaled until its forward
    /// component reaches the plane, so the angular placement is exact at
    /// any eccentricity.
    pub fn position(&self) -> Result<Vec3, TargetError> {
        self.validate()?;
        let h = self.h_deg.to_radians();
        let v = self.v_deg.to_radians();
        let d = self.depth_m;
        Ok(Vec3::new(d * h.tan(), d * v.tan() / h.cos(), d))
    }
}

/// Unique target depths in first-appearance order.
///
/// Targets sharing a depth are grouped onto one plane so the host scene
/// needs a single background surface per depth, not per target.
pub fn depth_planes(targets: &[Target]) -> Vec<f64> {
    let mut depths: Vec<f64> = Vec::new();
    for t in targets {
        if !depths.iter().any(|d| *d == t.depth_m) {
            depths.push(t.depth_m);
        }
    }
    depths
}
