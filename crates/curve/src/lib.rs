//! Keyframe curves: time-varying values sampled by simulation time.
//!
//! # Invariants
//! - Keyframes are ordered by time; keyframes sharing a timestamp keep
//!   insertion order, and the last one wins when sampling.
//! - Sampling before the first keyframe yields nothing.

mod continuous;
mod discrete;
mod keyframe;

pub use continuous::{Continuous, Interpolate};
pub use discrete::Discrete;
pub use keyframe::{Keyframe, KeyframeContainer};
