//! Core foundation layer: vector math, the angular error model, and the
//! data types every other module builds on. No internal dependencies.

pub mod math;
pub mod types;
