use strata_common::{PlayerId, Time};
use strata_curve::Discrete;

/// Which player controls an entity, over time.
#[derive(Debug, Clone, PartialEq)]
pub struct Ownership {
    owner: Discrete<PlayerId>,
}

impl Ownership {
    pub fn new(time: Time, owner: PlayerId) -> Self {
        Self {
            owner: Discrete::with_initial(time, owner),
        }
    }

    pub fn owner_at(&self, time: Time) -> Option<PlayerId> {
        self.owner.get(time)
    }

    /// Hand the entity to `owner` from `time` on.
    pub fn set_owner(&mut self, time: Time, owner: PlayerId) {
        self.owner.set_last(time, owner);
    }

    pub fn owners(&self) -> &Discrete<PlayerId> {
        &self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_changes_hands() {
        let mut o = Ownership::new(Time::ZERO, PlayerId(1));
        o.set_owner(Time(30.0), PlayerId(2));
        assert_eq!(o.owner_at(Time(29.0)), Some(PlayerId(1)));
        assert_eq!(o.owner_at(Time(30.0)), Some(PlayerId(2)));
        assert_eq!(o.owners().len(), 2);
    }
}
