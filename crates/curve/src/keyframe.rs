use serde::{Deserialize, Serialize, Serializer};
use strata_common::Time;

/// A value that becomes valid at `time`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    pub time: Time,
    pub value: T,
}

impl<T> Keyframe<T> {
    pub fn new(time: Time, value: T) -> Self {
        Self { time, value }
    }
}

/// Time-ordered keyframe storage shared by all curve kinds.
///
/// Serializes as a plain list of keyframes. Deserialized lists are sorted by
/// time, so hand-written scenario files do not need to be ordered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Vec<Keyframe<T>>", bound(deserialize = "T: Deserialize<'de>"))]
pub struct KeyframeContainer<T> {
    frames: Vec<Keyframe<T>>,
}

impl<T> Default for KeyframeContainer<T> {
    fn default() -> Self {
        Self { frames: Vec::new() }
    }
}

impl<T> KeyframeContainer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Keyframe<T>> {
        self.frames.get(index)
    }

    pub fn first(&self) -> Option<&Keyframe<T>> {
        self.frames.first()
    }

    pub fn last(&self) -> Option<&Keyframe<T>> {
        self.frames.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Keyframe<T>> {
        self.frames.iter()
    }

    /// Insert a keyframe after every keyframe at or before `time`.
    pub fn insert(&mut self, time: Time, value: T) {
        let at = self.frames.partition_point(|k| k.time <= time);
        self.frames.insert(at, Keyframe::new(time, value));
    }

    /// Index of the keyframe in effect at `time`, if any.
    pub fn last_before(&self, time: Time) -> Option<usize> {
        self.frames
            .partition_point(|k| k.time <= time)
            .checked_sub(1)
    }

    /// Drop every keyframe at or later than `time`.
    pub fn truncate_from(&mut self, time: Time) {
        let keep = self.frames.partition_point(|k| k.time < time);
        self.frames.truncate(keep);
    }
}

impl<T> From<Vec<Keyframe<T>>> for KeyframeContainer<T> {
    fn from(mut frames: Vec<Keyframe<T>>) -> Self {
        // stable: equal timestamps keep file order
        frames.sort_by(|a, b| {
            a.time
                .partial_cmp(&b.time)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self { frames }
    }
}

impl<T: Serialize> Serialize for KeyframeContainer<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.frames.serialize(serializer)
    }
}

impl<'a, T> IntoIterator for &'a KeyframeContainer<T> {
    type Item = &'a Keyframe<T>;
    type IntoIter = std::slice::Iter<'a, Keyframe<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
