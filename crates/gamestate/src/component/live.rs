use std::collections::BTreeMap;
use strata_common::Time;
use strata_curve::Discrete;

/// Named integer attributes such as hit points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Live {
    attributes: BTreeMap<String, Discrete<i64>>,
}

impl Live {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `name` with `value` from `time` on. Replaces any
    /// previous history of the attribute.
    pub fn add_attribute(&mut self, time: Time, name: impl Into<String>, value: i64) {
        self.attributes
            .insert(name.into(), Discrete::with_initial(time, value));
    }

    /// Change a tracked attribute. Returns `false` if `name` is not tracked.
    pub fn set_attribute(&mut self, time: Time, name: &str, value: i64) -> bool {
        match self.attributes.get_mut(name) {
            Some(curve) => {
                curve.set_last(time, value);
                true
            }
            None => false,
        }
    }

    pub fn attribute_at(&self, name: &str, time: Time) -> Option<i64> {
        self.attributes.get(name).and_then(|c| c.get(time))
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }
}
