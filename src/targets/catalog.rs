//! Built-in validation target catalogs.
//!
//! Each catalog is an explicit list of (horizontal deg, vertical deg,
//! depth m) triples at a nominal 6 m depth, ordered center-out so a
//! non-randomized run starts at fixation. The cross variants cover the
//! major axes and diagonals only; the grid variants fill the full square.

use super::Target;

/// Single central target, for drift checks.
pub const CENTER: &[(f64, f64, f64)] = &[(0.0, 0.0, 6.0)];

/// 5-point cross at +/-5 degrees.
pub const CROSS_5DEG: &[(f64, f64, f64)] = &[
    (0.0, 0.0, 6.0),
    (5.0, 0.0, 6.0),
    (0.0, -5.0, 6.0),
    (-5.0, 0.0, 6.0),
    (0.0, 5.0, 6.0),
];

/// 3x3 full grid at +/-5 degrees.
pub const GRID_3X3_5DEG: &[(f64, f64, f64)] = &[
    (0.0, 0.0, 6.0),
    (5.0, 0.0, 6.0),
    (0.0, -5.0, 6.0),
    (-5.0, 0.0, 6.0),
    (0.0, 5.0, 6.0),
    (5.0, 5.0, 6.0),
    (5.0, -5.0, 6.0),
    (-5.0, -5.0, 6.0),
    (-5.0, 5.0, 6.0),
];

/// Major positions of a 5x5 array at +/-10 degrees (17 targets).
pub const CROSS_10DEG: &[(f64, f64, f64)] = &[
    (0.0, 0.0, 6.0),
    (5.0, 0.0, 6.0),
    (0.0, -5.0, 6.0),
    (-5.0, 0.0, 6.0),
    (0.0, 5.0, 6.0),
    (5.0, 5.0, 6.0),
    (5.0, -5.0, 6.0),
    (-5.0, -5.0, 6.0),
    (-5.0, 5.0, 6.0),
    (10.0, 0.0, 6.0),
    (0.0, -10.0, 6.0),
    (-10.0, 0.0, 6.0),
    (0.0, 10.0, 6.0),
    (10.0, 10.0, 6.0),
    (10.0, -10.0, 6.0),
    (-10.0, -10.0, 6.0),
    (-10.0, 10.0, 6.0),
];

/// 5x5 full grid at +/-10 degrees (25 targets).
pub const GRID_5X5_10DEG: &[(f64, f64, f64)] = &[
    (0.0, 0.0, 6.0),
    (5.0, 0.0, 6.0),
    (0.0, -5.0, 6.0),
    (-5.0, 0.0, 6.0),
    (0.0, 5.0, 6.0),
    (5.0, 5.0, 6.0),
    (5.0, -5.0, 6.0),
    (-5.0, -5.0, 6.0),
    (-5.0, 5.0, 6.0),
    (10.0, 0.0, 6.0),
    (0.0, -10.0, 6.0),
    (-10.0, 0.0, 6.0),
    (0.0, 10.0, 6.0),
    (10.0, 10.0, 6.0),
    (10.0, -10.0, 6.0),
    (-10.0, -10.0, 6.0),
    (-10.0, 10.0, 6.0),
    (10.0, 5.0, 6.0),
    (10.0, -5.0, 6.0),
    (5.0, -10.0, 6.0),
    (-5.0, -10.0, 6.0),
    (-10.0, -5.0, 6.0),
    (-10.0, 5.0, 6.0),
    (-5.0, 10.0, 6.0),
    (5.0, 10.0, 6.0),
];

/// Major positions of a 7x7 array at +/-15 degrees (25 targets).
pub const CROSS_15DEG: &[(f64, f64, f64)] = &[
    (0.0, 0.0, 6.0),
    (5.0, 0.0, 6.0),
    (0.0, -5.0, 6.0),
    (-5.0, 0.0, 6.0),
    (0.0, 5.0, 6.0),
    (5.0, 5.0, 6.0),
    (5.0, -5.0, 6.0),
    (-5.0, -5.0, 6.0),
    (-5.0, 5.0, 6.0),
    (10.0, 0.0, 6.0),
    (0.0, -10.0, 6.0),
    (-10.0, 0.0, 6.0),
    (0.0, 10.0, 6.0),
    (10.0, 10.0, 6.0),
    (10.0, -10.0, 6.0),
    (-10.0, -10.0, 6.0),
    (-10.0, 10.0, 6.0),
    (15.0, 0.0, 6.0),
    (0.0, -15.0, 6.0),
    (-15.0, 0.0, 6.0),
    (0.0, 15.0, 6.0),
    (15.0, 15.0, 6.0),
    (15.0, -15.0, 6.0),
    (-15.0, -15.0, 6.0),
    (-15.0, 15.0, 6.0),
];

/// 7x7 full grid at +/-15 degrees (49 targets).
pub const GRID_7X7_15DEG: &[(f64, f64, f64)] = &[
    (0.0, 0.0, 6.0),
    (5.0, 0.0, 6.0),
    (0.0, -5.0, 6.0),
    (-5.0, 0.0, 6.0),
    (0.0, 5.0, 6.0),
    (5.0, 5.0, 6.0),
    (5.0, -5.0, 6.0),
    (-5.0, -5.0, 6.0),
    (-5.0, 5.0, 6.0),
    (10.0, 0.0, 6.0),
    (0.0, -10.0, 6.0),
    (-10.0, 0.0, 6.0),
    (0.0, 10.0, 6.0),
    (10.0, 10.0, 6.0),
    (10.0, -10.0, 6.0),
    (-10.0, -10.0, 6.0),
    (-10.0, 10.0, 6.0),
    (10.0, 5.0, 6.0),
    (10.0, -5.0, 6.0),
    (5.0, -10.0, 6.0),
    (-5.0, -10.0, 6.0),
    (-10.0, -5.0, 6.0),
    (-10.0, 5.0, 6.0),
    (-5.0, 10.0, 6.0),
    (5.0, 10.0, 6.0),
    (15.0, 0.0, 6.0),
    (0.0, -15.0, 6.0),
    (-15.0, 0.0, 6.0),
    (0.0, 15.0, 6.0),
    (15.0, 15.0, 6.0),
    (15.0, -15.0, 6.0),
    (-15.0, -15.0, 6.0),
    (-15.0, 15.0, 6.0),
    (15.0, 10.0, 6.0),
    (15.0, 5.0, 6.0),
    (15.0, -5.0, 6.0),
    (15.0, -10.0, 6.0),
    (10.0, -15.0, 6.0),
    (5.0, -15.0, 6.0),
    (-5.0, -15.0, 6.0),
    (-10.0, -15.0, 6.0),
    (-15.0, -10.0, 6.0),
    (-15.0, -5.0, 6.0),
    (-15.0, 5.0, 6.0),
    (-15.0, 10.0, 6.0),
    (-10.0, 15.0, 6.0),
    (-5.0, 15.0, 6.0),
    (5.0, 15.0, 6.0),
    (10.0, 15.0, 6.0),
];

/// Materialize a catalog (or any user triple list) into targets.
///
/// Catalog entries are valid by construction; user-supplied triples go
/// through the same [`Target`] invariants and fail fast when broken.
pub fn targets(set: &[(f64, f64, f64)]) -> Result<Vec<Target>, super::TargetError> {
    set.iter()
        .map(|&(h, v, d)| Target::new(h, v, d))
        .collect()
}
