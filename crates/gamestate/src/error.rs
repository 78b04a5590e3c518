use strata_common::EntityId;

use crate::component::ComponentType;

/// Errors from game state operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameStateError {
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),
    #[error("entity id {0} is already in use")]
    IdInUse(EntityId),
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        entity: EntityId,
        component: ComponentType,
    },
    #[error("entity {0} has no position at the current time")]
    NotPlaced(EntityId),
    #[error("entity {entity} cannot move at speed {speed}")]
    InvalidSpeed { entity: EntityId, speed: f32 },
}
