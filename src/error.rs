//! Crate-level error type composing the module-local errors.

use crate::core::math::GeometryError;
use crate::stats::StatsError;
use crate::targets::TargetError;
use thiserror::Error;

/// Errors from the validation pipeline.
///
/// Geometry and statistics failures abort an in-progress run without
/// producing a partial result; data-quality shortfalls (too few samples)
/// are not errors and surface as `MISSING` measures instead.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A validation run needs at least one target.
    #[error("no validation targets supplied")]
    NoTargets,

    /// Invalid target specification.
    #[error(transparent)]
    Target(#[from] TargetError),

    /// Geometric failure (zero-length vector, coincident origin/target).
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Statistics failure on a non-optional computation.
    #[error(transparent)]
    Stats(#[from] StatsError),

    /// Per-target result list and raw sample list fell out of step.
    #[error("targets/samples length mismatch ({targets} targets, {samples} sample batches)")]
    LengthMismatch {
        /// Number of per-target results.
        targets: usize,
        /// Number of raw sample batches.
        samples: usize,
    },

    /// `finish()` was called before every target was measured.
    #[error("validation run incomplete ({completed}/{total} targets measured)")]
    RunIncomplete {
        /// Targets measured so far.
        completed: usize,
        /// Targets in the run.
        total: usize,
    },

    /// A monocular-only operation was invoked on binocular-only data.
    #[error("missing capability: {0}")]
    MissingCapability(&'static str),

    /// Invalid recompute filter range.
    #[error("invalid recompute range: {0}")]
    InvalidRange(String),

    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary (de)serialization failure.
    #[error("encode error: {0}")]
    Encode(String),
}

impl From<postcard::Error> for ValidationError {
    fn from(e: postcard::Error) -> Self {
        ValidationError::Encode(e.to_string())
    }
}
