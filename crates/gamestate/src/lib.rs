//! Game state: entities, their components, and the bridge to the render stage.
//!
//! # Invariants
//! - An entity holds at most one component per [`ComponentType`].
//! - Components are owned by exactly one entity; duplication deep-copies them.
//! - Entities never own their render proxy. A duplicate starts without one.
//! - Pushing to the render stage without a position is a silent no-op.

pub mod component;
mod entity;
mod error;
mod factory;
mod state;
mod storage;

pub use component::{Component, ComponentType, Idle, Live, Move, Ownership, Position};
pub use entity::GameEntity;
pub use error::GameStateError;
pub use factory::EntityFactory;
pub use state::{GameEvent, GameState};
pub use storage::ComponentMap;

pub fn crate_info() -> &'static str {
    "strata-gamestate v0.1.0"
}
