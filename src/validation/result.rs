//! Validation result containers and serialization.

use super::measures::MeasureSet;
use crate::core::math::Vec3;
use crate::core::types::GazeSample;
use crate::error::ValidationError;
use crate::targets::Target;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Magic bytes prefixed to the binary result format.
const RESULT_MAGIC: [u8; 4] = *b"DRVR";
/// Binary result format version.
const RESULT_VERSION: u8 = 1;

/// Participant/run metadata merged verbatim into the result.
pub type Metadata = BTreeMap<String, String>;

/// Reduced measures for one validation target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetResult {
    /// Index of the target in the caller-supplied target list (not the
    /// randomized presentation order).
    pub index: usize,
    /// The target specification.
    pub target: Target,
    /// Resolved target position in the head-locked frame (meters).
    pub position: Vec3,
    /// Combined and per-eye measures plus IPD.
    pub measures: MeasureSet,
}

/// Sample-index window the current measures were computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleWindow {
    /// First sample index used (into the post-discard batches).
    pub start: usize,
    /// One past the last sample index, `None` for the full batch.
    pub end: Option<usize>,
}

/// Aggregate result of one full validation run.
///
/// Immutable after creation; [`recompute`](ValidationResult::recompute)
/// derives new results from the retained raw samples instead of mutating
/// in place. The per-target result list and the raw sample batches stay
/// parallel (`targets.len() == samples.len()`), in presentation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Run metadata (timestamp, label, participant info).
    pub metadata: Metadata,
    /// Grand aggregate across targets: the unweighted mean (or the
    /// recompute aggregation function) of every per-target measure, never
    /// a reduction over pooled raw samples.
    pub global: MeasureSet,
    /// Sample window used for the measures, set by recompute.
    #[serde(default)]
    pub window: Option<SampleWindow>,
    /// Per-target results.
    pub targets: Vec<TargetResult>,
    /// Raw post-discard sample batches, parallel to `targets`.
    pub samples: Vec<Vec<GazeSample>>,
}

impl ValidationResult {
    /// Build a result, enforcing the parallel-list invariant.
    pub fn new(
        metadata: Metadata,
        global: MeasureSet,
        targets: Vec<TargetResult>,
        samples: Vec<Vec<GazeSample>>,
    ) -> Result<Self, ValidationError> {
        if targets.len() != samples.len() {
            return Err(ValidationError::LengthMismatch {
                targets: targets.len(),
                samples: samples.len(),
            });
        }
        Ok(Self {
            metadata,
            global,
            window: None,
            targets,
            samples,
        })
    }

    /// Human-readable summary: one line of global measures plus one line
    /// per target.
    pub fn summary(&self) -> String {
        let g = &self.global.combined;
        let mut out = format!(
            "Validation Result: Acc: {:.2} (x: {:.2}, y: {:.2}), RMSi: {:.2}, SD: {:.2}",
            g.acc, g.acc_x, g.acc_y, g.rmsi, g.sd
        );
        for tar in &self.targets {
            let m = &tar.measures.combined;
            out.push_str(&format!(
                "\n  Target #{} - x: {:+.1}, y: {:+.1}, d: {:.1} - Acc: {:.2} (x: {:.2}, y: {:.2})\t RMSi: {:.2}, SD: {:.2}",
                tar.index,
                tar.target.h_deg,
                tar.target.v_deg,
                tar.target.depth_m,
                m.acc,
                m.acc_x,
                m.acc_y,
                m.rmsi,
                m.sd
            ));
        }
        out
    }

    /// Serialize to a JSON document.
    pub fn to_json(&self) -> Result<String, ValidationError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from a JSON document, re-checking the parallel-list
    /// invariant.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let r: Self = serde_json::from_str(json)?;
        if r.targets.len() != r.samples.len() {
            return Err(ValidationError::LengthMismatch {
                targets: r.targets.len(),
                samples: r.samples.len(),
            });
        }
        Ok(r)
    }

    /// Write the JSON document to a file.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<(), ValidationError> {
        let mut f = File::create(path)?;
        f.write_all(self.to_json()?.as_bytes())?;
        Ok(())
    }

    /// Read a result back from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ValidationError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save the full result (including raw samples) in the compact
    /// binary format, preserving everything needed for later recompute
    /// and analysis.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ValidationError> {
        let mut f = File::create(path)?;
        f.write_all(&RESULT_MAGIC)?;
        f.write_all(&[RESULT_VERSION])?;
        let bytes = postcard::to_allocvec(self)?;
        f.write_all(&bytes)?;
        Ok(())
    }

    /// Load a result from the binary format.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ValidationError> {
        let mut f = File::open(path)?;
        let mut header = [0u8; 5];
        f.read_exact(&mut header)?;
        if header[..4] != RESULT_MAGIC || header[4] != RESULT_VERSION {
            return Err(ValidationError::Encode(
                "not a drishti validation result file".to_string(),
            ));
        }
        let mut bytes = Vec::new();
        f.read_to_end(&mut bytes)?;
        Ok(postcard::from_bytes(&bytes)?)
    }
}
