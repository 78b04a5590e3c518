/// Idle ability: what the entity shows while doing nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Idle {
    pub ability: String,
}

impl Idle {
    pub fn new(ability: impl Into<String>) -> Self {
        Self {
            ability: ability.into(),
        }
    }
}

/// Move ability with the entity's movement speed in world units per second.
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub ability: String,
    pub speed: f32,
}

impl Move {
    pub fn new(ability: impl Into<String>, speed: f32) -> Self {
        Self {
            ability: ability.into(),
            speed,
        }
    }
}
