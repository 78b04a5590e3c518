use serde::{Deserialize, Serialize};
use strata_common::Time;

use crate::keyframe::{Keyframe, KeyframeContainer};

/// A curve that jumps from one keyframe value to the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent, bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Discrete<T> {
    frames: KeyframeContainer<T>,
}

impl<T> Default for Discrete<T> {
    fn default() -> Self {
        Self {
            frames: KeyframeContainer::new(),
        }
    }
}

impl<T: Clone> Discrete<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial(time: Time, value: T) -> Self {
        let mut curve = Self::new();
        curve.set_insert(time, value);
        curve
    }

    /// Value of the most recent keyframe at or before `time`.
    pub fn get(&self, time: Time) -> Option<T> {
        let idx = self.frames.last_before(time)?;
        self.frames.get(idx).map(|k| k.value.clone())
    }

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

    pub fn last_change(&self) -> Option<Time> {
        self.frames.last().map(|k| k.time)
    }
}

impl<T> From<Vec<Keyframe<T>>> for Discrete<T> {
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
    fn steps_between_keyframes() {
        let mut c = Discrete::with_initial(Time(0.0), 90.0f32);
        c.set_insert(Time(2.0), 180.0);
        assert_eq!(c.get(Time(1.999)), Some(90.0));
        assert_eq!(c.get(Time(2.0)), Some(180.0));
    }

    #[test]
    fn nothing_before_first_keyframe() {
        let c = Discrete::with_initial(Time(1.0), "idle".to_string());
        assert_eq!(c.get(Time(0.0)), None);
        assert_eq!(c.get(Time(1.0)).as_deref(), Some("idle"));
    }

    #[test]
    fn set_last_overwrites_same_timestamp() {
        let mut c = Discrete::with_initial(Time(0.0), 1);
        c.set_insert(Time(3.0), 2);
        c.set_last(Time(3.0), 4);
        assert_eq!(c.len(), 2);
        assert_eq!(c.get(Time(3.0)), Some(4));
    }

    #[test]
    fn deserializes_keyframe_list() {
        let c: Discrete<i64> = serde_json::from_str(r#"[{"time":0.0,"value":100}]"#).unwrap();
        assert_eq!(c.get(Time(5.0)), Some(100));
        assert_eq!(c.last_change(), Some(Time(0.0)));
    }
}
