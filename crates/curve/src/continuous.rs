use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use strata_common::Time;

use crate::keyframe::{Keyframe, KeyframeContainer};

/// Values that can be blended between two keyframes.
pub trait Interpolate: Clone {
    /// Blend towards `to`; `fraction` is in `[0, 1)`.
    fn interpolate(&self, to: &Self, fraction: f64) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, to: &Self, fraction: f64) -> Self {
        self + (to - self) * fraction as f32
    }
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, fraction: f64) -> Self {
        self + (to - self) * fraction
    }
}

impl Interpolate for Vec2 {
    fn interpolate(&self, to: &Self, fraction: f64) -> Self {
        self.lerp(*to, fraction as f32)
    }
}

impl Interpolate for Vec3 {
    fn interpolate(&self, to: &Self, fraction: f64) -> Self {
        self.lerp(*to, fraction as f32)
    }
}

/// A curve whose value changes linearly between keyframes.
///
/// After the last keyframe the curve holds its final value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent, bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Continuous<T> {
    frames: KeyframeContainer<T>,
}

impl<T> Default for Continuous<T> {
    fn default() -> Self {
        Self {
            frames: KeyframeContainer::new(),
        }
    }
}

impl<T: Interpolate> Continuous<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A curve holding `value` from `time` onwards.
    pub fn with_initial(time: Time, value: T) -> Self {
        let mut curve = Self::new();
        curve.set_insert(time, value);
        curve
    }

    /// Sample the curve. `None` before the first keyframe.
    pub fn get(&self, time: Time) -> Option<T> {
        let idx = self.frames.last_before(time)?;
        let current = self.frames.get(idx)?;
        match self.frames.get(idx + 1) {
            // next.time > time >= current.time, so the span is positive
            Some(next) => {
                let fraction = (time - current.time) / (next.time - current.time);
                Some(current.value.interpolate(&next.value, fraction))
            }
            None => Some(current.value.clone()),
        }
    }

    /// Add a keyframe without touching the existing ones.
    pub fn set_insert(&mut self, time: Time, value: T) {
        self.frames.insert(time, value);
    }

    /// Replace everything at or after `time` with a single keyframe.
    pub fn set_last(&mut self, time: Time, value: T) {
        self.frames.truncate_from(time);
        self.frames.insert(time, value);
    }

    pub fn keyframes(&self) -> &KeyframeContainer<T> {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Time of the final keyframe.
    pub fn last_change(&self) -> Option<Time> {
        self.frames.last().map(|k| k.time)
    }
}

impl<T> From<Vec<Keyframe<T>>> for Continuous<T> {
    fn from(frames: Vec<Keyframe<T>>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_curve_samples_nothing() {
        let c: Continuous<f32> = Continuous::new();
        assert!(c.get(Time(1.0)).is_none());
        assert!(c.is_empty());
    }

    #[test]
    fn interpolates_between_keyframes() {
        let mut c = Continuous::with_initial(Time(0.0), Vec3::ZERO);
        c.set_insert(Time(2.0), Vec3::new(4.0, 2.0, 0.0));
        assert_eq!(c.get(Time(1.0)), Some(Vec3::new(2.0, 1.0, 0.0)));
        assert_eq!(c.get(Time(2.0)), Some(Vec3::new(4.0, 2.0, 0.0)));
    }

    #[test]
    fn holds_last_value() {
        let c = Continuous::with_initial(Time(1.0), 3.0f64);
        assert_eq!(c.get(Time(0.5)), None);
        assert_eq!(c.get(Time(10.0)), Some(3.0));
    }

    #[test]
    fn jump_at_shared_timestamp() {
        let mut c = Continuous::with_initial(Time(0.0), 0.0f32);
        c.set_insert(Time(1.0), 1.0);
        c.set_insert(Time(1.0), 5.0);
        c.set_insert(Time(2.0), 7.0);
        assert_eq!(c.get(Time(1.0)), Some(5.0));
        assert_eq!(c.get(Time(1.5)), Some(6.0));
    }

    #[test]
    fn set_last_drops_future_keyframes() {
        let mut c = Continuous::with_initial(Time(0.0), 0.0f32);
        c.set_insert(Time(5.0), 5.0);
        c.set_insert(Time(9.0), 9.0);
        c.set_last(Time(5.0), 1.0);
        assert_eq!(c.len(), 2);
        assert_eq!(c.last_change(), Some(Time(5.0)));
        assert_eq!(c.get(Time(20.0)), Some(1.0));
    }
}
