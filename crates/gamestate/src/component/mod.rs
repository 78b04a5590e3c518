//! Components that can be attached to a [`GameEntity`](crate::GameEntity).
//!
//! The set of component kinds is closed: every kind has a [`ComponentType`]
//! tag and a [`Component`] variant carrying its data.

mod ability;
mod live;
mod ownership;
mod position;

pub use ability::{Idle, Move};
pub use live::Live;
pub use ownership::Ownership;
pub use position::Position;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag of a component. An entity holds at most one component per tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentType {
    Position,
    Ownership,
    Live,
    Idle,
    Move,
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentType::Position => "position",
            ComponentType::Ownership => "ownership",
            ComponentType::Live => "live",
            ComponentType::Idle => "idle",
            ComponentType::Move => "move",
        };
        f.write_str(name)
    }
}

/// A component instance. Cloning deep-copies all of its curves.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Position(Position),
    Ownership(Ownership),
    Live(Live),
    Idle(Idle),
    Move(Move),
}

impl Component {
    pub fn component_type(&self) -> ComponentType {
        match self {
            Component::Position(_) => ComponentType::Position,
            Component::Ownership(_) => ComponentType::Ownership,
            Component::Live(_) => ComponentType::Live,
            Component::Idle(_) => ComponentType::Idle,
            Component::Move(_) => ComponentType::Move,
        }
    }
}

impl From<Position> for Component {
    fn from(c: Position) -> Self {
        Component::Position(c)
    }
}

impl From<Ownership> for Component {
    fn from(c: Ownership) -> Self {
        Component::Ownership(c)
    }
}

impl From<Live> for Component {
    fn from(c: Live) -> Self {
        Component::Live(c)
    }
}

impl From<Idle> for Component {
    fn from(c: Idle) -> Self {
        Component::Idle(c)
    }
}

impl From<Move> for Component {
    fn from(c: Move) -> Self {
        Component::Move(c)
    }
}
