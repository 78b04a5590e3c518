use glam::Vec3;
use strata_common::{Angle, Time};
use strata_curve::{Continuous, Discrete};

/// Where an entity is and which way it faces, over time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Position {
    positions: Continuous<Vec3>,
    angles: Discrete<Angle>,
}

impl Position {
    /// Place the entity at `position`, facing `angle`, from `time` onwards.
    pub fn new(time: Time, position: Vec3, angle: Angle) -> Self {
        Self {
            positions: Continuous::with_initial(time, position),
            angles: Discrete::with_initial(time, angle),
        }
    }

    pub fn from_curves(positions: Continuous<Vec3>, angles: Discrete<Angle>) -> Self {
        Self { positions, angles }
    }

    pub fn positions(&self) -> &Continuous<Vec3> {
        &self.positions
    }

    pub fn angles(&self) -> &Discrete<Angle> {
        &self.angles
    }

    pub fn positions_mut(&mut self) -> &mut Continuous<Vec3> {
        &mut self.positions
    }

    pub fn angles_mut(&mut self) -> &mut Discrete<Angle> {
        &mut self.angles
    }

    pub fn position_at(&self, time: Time) -> Option<Vec3> {
        self.positions.get(time)
    }

    pub fn angle_at(&self, time: Time) -> Option<Angle> {
        self.angles.get(time)
    }

    /// Teleport: the entity is at `position` from `time` on, discarding any
    /// planned movement after it.
    pub fn set_position(&mut self, time: Time, position: Vec3) {
        self.positions.set_last(time, position);
    }

    pub fn set_angle(&mut self, time: Time, angle: Angle) {
        self.angles.set_last(time, angle);
    }
}
