//! 3D vector math and the angular gaze error model.
//!
//! All angles are in degrees. The head-locked frame is Y-up, Z-forward:
//! horizontal angles are positive to the right, vertical angles positive
//! upward.
//!
//! The error model computes three things per gaze sample:
//!
//! 1. Combined angular error between the gaze direction and the vector
//!    from the actual eye origin to the target, via a clamped arccos.
//!    Using the per-sample eye origin corrects for 6-DoF tracker jitter.
//! 2. A signed horizontal/vertical decomposition of the shortest-arc
//!    rotation mapping the eye-to-target vector onto the gaze vector.
//! 3. Absolute gaze direction angles relative to canonical forward
//!    (0, 0, 1), independent of any target.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};
use thiserror::Error;

/// Norm below which a vector is treated as zero-length.
const ZERO_NORM_EPS: f64 = 1e-12;

/// Dot product below which two unit vectors are treated as antiparallel.
const ANTIPARALLEL_EPS: f64 = 1e-9;

/// Errors from the geometric error model.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// A direction could not be derived because the vector has (near) zero
    /// length, e.g. the eye origin coincides with the target position.
    #[error("zero-length vector has no direction")]
    ZeroLengthVector,
}

/// 3D vector in the head-locked reference frame (meters or unitless).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// Rightward component.
    pub x: f64,
    /// Upward component.
    pub y: f64,
    /// Forward component.
    pub z: f64,
}

impl Vec3 {
    /// Zero vector.
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Canonical forward direction of the head-locked frame.
    pub const FORWARD: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Create a vector from components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    #[inline]
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length.
    #[inline]
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction. Gaze sources do not all
    /// guarantee unit-length rays, so the error model always normalizes.
    pub fn normalized(self) -> Result<Vec3, GeometryError> {
        let n = self.norm();
        if n < ZERO_NORM_EPS {
            return Err(GeometryError::ZeroLengthVector);
        }
        Ok(self * (1.0 / n))
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// Angular error of one gaze sample against one target, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularError {
    /// Combined (unsigned) angular error.
    pub total_deg: f64,
    /// Signed horizontal component, positive when gaze lands right of the
    /// target.
    pub h_deg: f64,
    /// Signed vertical component, positive when gaze lands above the
    /// target.
    pub v_deg: f64,
}

/// Angle between two vectors in degrees.
///
/// The dot product is clamped to [-1, 1] before `acos`: floating point
/// drift on normalized vectors can otherwise push it out of the arccos
/// domain. Only the directions matter, lengths are normalized away.
pub fn angle_between_deg(a: Vec3, b: Vec3) -> Result<f64, GeometryError> {
    let a = a.normalized()?;
    let b = b.normalized()?;
    Ok(clamped_acos_deg(a.dot(b)))
}

/// Arccos of a clamped dot product, in degrees.
#[inline]
pub fn clamped_acos_deg(dot: f64) -> f64 {
    dot.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Horizontal/vertical direction angles of a vector, in degrees.
///
/// Horizontal is the azimuth around the up axis (positive right),
/// vertical is the elevation above the horizontal plane (positive up).
pub fn direction_angles_deg(v: Vec3) -> Result<(f64, f64), GeometryError> {
    let v = v.normalized()?;
    let h = v.x.atan2(v.z).to_degrees();
    let p = v.y.clamp(-1.0, 1.0).asin().to_degrees();
    Ok((h, p))
}

/// Direction angles of the canonical forward vector after the shortest-arc
/// rotation mapping `from` onto `to`.
///
/// This is the exact Euler-like decomposition of the rotation between the
/// two directions; for small separations it reduces to the difference of
/// their direction angles. Antiparallel inputs resolve to a 180 degree
/// rotation about an arbitrary axis orthogonal to `from`.
pub fn rotation_angles_deg(from: Vec3, to: Vec3) -> Result<(f64, f64), GeometryError> {
    let f = from.normalized()?;
    let t = to.normalized()?;

    let d = f.dot(t);
    let (qv, qw) = if d < -1.0 + ANTIPARALLEL_EPS {
        let axis = if f.x.abs() < 0.9 {
            f.cross(Vec3::new(1.0, 0.0, 0.0))
        } else {
            f.cross(Vec3::new(0.0, 1.0, 0.0))
        };
        (axis.normalized()?, 0.0)
    } else {
        let v = f.cross(t);
        let w = 1.0 + d;
        let n = (v.dot(v) + w * w).sqrt();
        (v * (1.0 / n), w / n)
    };

    // Rotate forward by the unit quaternion (qv, qw).
    let fw = Vec3::FORWARD;
    let tmp = qv.cross(fw) * 2.0;
    let rotated = fw + tmp * qw + qv.cross(tmp);
    direction_angles_deg(rotated)
}

/// Full angular error of one gaze ray against a target point expressed in
/// the same reference frame.
///
/// The eye-to-target vector is built from the actual per-sample eye
/// origin, not the frame origin. Fails when the origin coincides with the
/// target or the gaze direction has zero length.
pub fn gaze_target_error(
    origin: Vec3,
    gaze_dir: Vec3,
    target: Vec3,
) -> Result<AngularError, GeometryError> {
    let eye_tar = (target - origin).normalized()?;
    let gaze = gaze_dir.normalized()?;

    let total_deg = clamped_acos_deg(eye_tar.dot(gaze));
    let (h_deg, v_deg) = rotation_angles_deg(eye_tar, gaze)?;

    Ok(AngularError {
        total_deg,
        h_deg,
        v_deg,
    })
}

/// Absolute gaze angles in head space, relative to canonical forward.
pub fn gaze_angles_deg(gaze_dir: Vec3) -> Result<(f64, f64), GeometryError> {
    direction_angles_deg(gaze_dir)
}
