//! Gaze source capability seam.
//!
//! Concrete eye-tracker adapters live host-side and implement
//! [`GazeSource`]; the validation core never branches on a device type.

use crate::core::types::GazeSample;

/// Abstraction over a physical or replayed eye tracker.
pub trait GazeSource {
    /// Whether this source delivers per-eye (monocular) rays. Monocular
    /// measures and IPD are only available when it does.
    fn has_monocular_data(&self) -> bool;

    /// Next available sample, if any. Non-blocking; the caller paces
    /// calls at display-frame rate.
    fn next_sample(&mut self) -> Option<GazeSample>;
}

/// Replays a recorded sample sequence, e.g. one read from a gaze bag.
pub struct ReplaySource {
    samples: std::vec::IntoIter<GazeSample>,
    monocular: bool,
}

impl ReplaySource {
    /// Wrap a recorded sample sequence.
    pub fn new(samples: Vec<GazeSample>) -> Self {
        let monocular = samples.iter().any(|s| s.has_monocular());
        Self {
            samples: samples.into_iter(),
            monocular,
        }
    }
}

impl GazeSource for ReplaySource {
    fn has_monocular_data(&self) -> bool {
        self.monocular
    }

    fn next_sample(&mut self) -> Option<GazeSample> {
        self.samples.next()
    }
}
