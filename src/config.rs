//! Validation run configuration.
//!
//! A typed record with serde defaults, loadable from a YAML file.
//!
//! ## Example YAML
//!
//! ```yaml
//! settle_ms: 1000.0
//! sample_dur_ms: 2000.0
//! feedback_ms: 200.0
//! discard_samples: 20
//! randomize: true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config load error.
#[derive(Debug, Clone)]
pub enum ConfigLoadError {
    /// I/O error
    Io(String),
    /// Parse error
    Parse(String),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoadError::Io(msg) => write!(f, "IO error: {}", msg),
            ConfigLoadError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigLoadError {}

/// Timing and sequencing parameters for one validation run.
///
/// All durations are in milliseconds of the external frame clock.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ValidationConfig {
    /// Inter-target delay before sampling starts, letting the landing
    /// saccade settle.
    #[serde(default = "defaults::settle_ms")]
    pub settle_ms: f64,

    /// Sampling duration per target.
    #[serde(default = "defaults::sample_dur_ms")]
    pub sample_dur_ms: f64,

    /// Post-target feedback pause before the next target.
    #[serde(default = "defaults::feedback_ms")]
    pub feedback_ms: f64,

    /// Samples discarded unconditionally at the start of each target's
    /// batch. A fixed settle-window heuristic, not a fixation detector.
    #[serde(default = "defaults::discard_samples")]
    pub discard_samples: usize,

    /// Shuffle target presentation order per run.
    #[serde(default = "defaults::randomize")]
    pub randomize: bool,

    /// Tick interval used by the offline replay driver.
    #[serde(default = "defaults::frame_interval_ms")]
    pub frame_interval_ms: f64,
}

mod defaults {
    pub fn settle_ms() -> f64 {
        1000.0
    }
    pub fn sample_dur_ms() -> f64 {
        2000.0
    }
    pub fn feedback_ms() -> f64 {
        200.0
    }
    pub fn discard_samples() -> usize {
        20
    }
    pub fn randomize() -> bool {
        true
    }
    pub fn frame_interval_ms() -> f64 {
        // 90 Hz HMD refresh
        1000.0 / 90.0
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            settle_ms: defaults::settle_ms(),
            sample_dur_ms: defaults::sample_dur_ms(),
            feedback_ms: defaults::feedback_ms(),
            discard_samples: defaults::discard_samples(),
            randomize: defaults::randomize(),
            frame_interval_ms: defaults::frame_interval_ms(),
        }
    }
}

impl ValidationConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from the default config path (configs/validation.yaml),
    /// falling back to built-in defaults when the file does not exist.
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/validation.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }
}
