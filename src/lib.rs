//! # Drishti
//!
//! Gaze validation and accuracy/precision measurement for VR eye
//! tracking.
//!
//! ## Overview
//!
//! Drishti reduces raw per-frame gaze-ray samples, collected while a
//! participant fixates a sequence of head-locked targets, to calibrated
//! accuracy and precision metrics in degrees of visual angle:
//!
//! - **Accuracy**: mean/median angular offset between gaze and target,
//!   with signed horizontal/vertical decomposition
//! - **Precision**: population SD and intersample RMS of the angular
//!   error
//! - Per target, in aggregate, and optionally split by eye (with IPD)
//!
//! Rendering, HMD pose tracking, and device I/O stay host-side: the
//! sequencer is driven by one `tick` per display frame and answers with
//! marker commands, and gaze hardware is reached through the
//! [`GazeSource`] seam.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use drishti::{catalog, Metadata, ValidationConfig, ValidationSequencer};
//!
//! let targets = catalog::targets(catalog::CROSS_5DEG)?;
//! let mut seq = ValidationSequencer::new(&targets, ValidationConfig::default())?;
//!
//! // Per display frame:
//! let cmd = seq.tick(now_ms)?;     // position/show/hide the marker
//! seq.push_sample(gaze_sample);    // deliver tracker data as it arrives
//!
//! // After the Finished command:
//! let result = seq.finish(Metadata::new())?;
//! println!("{}", result.summary());
//! result.to_json_file("validation.json")?;
//! ```
//!
//! ## Coordinate System
//!
//! Head-locked frame, Y-up, Z-forward: horizontal angles positive to the
//! right, vertical angles positive up. Positions in meters, angles in
//! degrees, IPD in millimeters.

#![warn(missing_docs)]

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod stats;
pub mod targets;
pub mod validation;

pub use config::{ConfigLoadError, ValidationConfig};
pub use crate::core::math::{
    angle_between_deg, direction_angles_deg, gaze_angles_deg, gaze_target_error, AngularError,
    GeometryError, Vec3,
};
pub use crate::core::types::{Eye, EyeRay, GazeSample, MISSING};
pub use error::ValidationError;
pub use io::{GazeBagPlayer, GazeBagRecorder};
pub use targets::{catalog, depth_planes, Target, TargetError};
pub use validation::{
    measure_ipd, run_offline, GazeMeasures, GazeSource, MeasureSet, Metadata, Phase,
    RecomputeOptions, ReplaySource, SequencerCommand, TargetResult, ValidationResult,
    ValidationSequencer,
};
