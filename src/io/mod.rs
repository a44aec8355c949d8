//! Infrastructure layer: binary session recording and playback.

pub mod bag;

pub use bag::{BagError, BagInfo, GazeBagPlayer, GazeBagRecorder};
