//! Shared types used across the strata crates.

pub mod types;

pub use types::{Angle, EntityId, PlayerId, Time};
