use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use strata_assets::AssetPath;
use strata_common::{EntityId, Time};
use strata_render::RenderEntity;
use tracing::{debug, warn};

use crate::component::{Component, ComponentType};
use crate::entity::GameEntity;
use crate::error::GameStateError;
use crate::factory::EntityFactory;

/// An event record produced by every mutation that goes through [`GameState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: EntityId },
    Duplicated { source: EntityId, id: EntityId },
    Despawned { id: EntityId },
    ComponentAdded { id: EntityId, component: ComponentType },
    ComponentReplaced { id: EntityId, component: ComponentType },
    RenderLinked { id: EntityId },
    Moved {
        id: EntityId,
        from: Vec3,
        to: Vec3,
        departure: Time,
        arrival: Time,
    },
}

/// All entities of a running simulation plus the simulation clock.
///
/// Entities are kept in a BTreeMap so iteration (and therefore sync order)
/// is deterministic.
#[derive(Debug, Default)]
pub struct GameState {
    entities: BTreeMap<EntityId, GameEntity>,
    time: Time,
    event_log: Vec<GameEvent>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation time.
    pub fn time(&self) -> Time {
        self.time
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> &BTreeMap<EntityId, GameEntity> {
        &self.entities
    }

    pub fn get(&self, id: EntityId) -> Option<&GameEntity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut GameEntity> {
        self.entities.get_mut(&id)
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.event_log)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.event_log
    }

    /// Move the clock forward. Requests to go back in time are ignored.
    pub fn advance(&mut self, to: Time) -> bool {
        if to < self.time {
            warn!(now = %self.time, requested = %to, "refusing to move the clock backwards");
            return false;
        }
        self.time = to;
        true
    }

    /// Create an entity under a fresh id.
    pub fn spawn(&mut self, animation_path: Option<AssetPath>) -> EntityId {
        let entity = EntityFactory::create(animation_path);
        let id = entity.id();
        self.entities.insert(id, entity);
        self.event_log.push(GameEvent::Spawned { id });
        debug!(entity = %id, "spawned");
        id
    }

    /// Take ownership of an entity built elsewhere.
    pub fn insert(&mut self, entity: GameEntity) -> Result<(), GameStateError> {
        let id = entity.id();
        if self.entities.contains_key(&id) {
            return Err(GameStateError::IdInUse(id));
        }
        self.entities.insert(id, entity);
        self.event_log.push(GameEvent::Spawned { id });
        Ok(())
    }

    /// Copy `source` under a fresh id. The copy is not linked to the render stage.
    pub fn duplicate(&mut self, source: EntityId) -> Result<EntityId, GameStateError> {
        let entity = self
            .entities
            .get(&source)
            .ok_or(GameStateError::UnknownEntity(source))?;
        let copy = EntityFactory::duplicate(entity);
        let id = copy.id();
        self.entities.insert(id, copy);
        self.event_log.push(GameEvent::Duplicated { source, id });
        Ok(id)
    }

    /// Remove an entity. Its render proxy stays with the render stage.
    pub fn despawn(&mut self, id: EntityId) -> Option<GameEntity> {
        let removed = self.entities.remove(&id);
        if removed.is_some() {
            self.event_log.push(GameEvent::Despawned { id });
        }
        removed
    }

    pub fn add_component(
        &mut self,
        id: EntityId,
        component: impl Into<Component>,
    ) -> Result<(), GameStateError> {
        let entity = self.entity_mut(id)?;
        let component = component.into();
        let ty = component.component_type();
        let event = match entity.add_component(component) {
            Some(_) => GameEvent::ComponentReplaced { id, component: ty },
            None => GameEvent::ComponentAdded { id, component: ty },
        };
        self.event_log.push(event);
        Ok(())
    }

    /// Link an entity to a render proxy; the entity pushes its state at once.
    pub fn link_render_entity(
        &mut self,
        id: EntityId,
        proxy: Arc<dyn RenderEntity>,
    ) -> Result<(), GameStateError> {
        self.entity_mut(id)?.set_render_entity(proxy);
        self.event_log.push(GameEvent::RenderLinked { id });
        Ok(())
    }

    /// Push one entity's current state to its render proxy.
    pub fn sync(&self, id: EntityId) -> Result<(), GameStateError> {
        self.entities
            .get(&id)
            .ok_or(GameStateError::UnknownEntity(id))?
            .push_to_render();
        Ok(())
    }

    /// Push every entity's current state to its render proxy.
    pub fn sync_all(&self) {
        for entity in self.entities.values() {
            entity.push_to_render();
        }
    }

    /// Send an entity in a straight line to `target`, starting now.
    ///
    /// Requires position and move components. Replaces any movement planned
    /// after the current time, turns the entity towards the target and pushes
    /// the new trajectory to the render stage. Returns the arrival time.
    pub fn move_entity(&mut self, id: EntityId, target: Vec3) -> Result<Time, GameStateError> {
        let now = self.time;
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(GameStateError::UnknownEntity(id))?;

        let speed = entity
            .components()
            .movement()
            .map(|m| m.speed)
            .ok_or(GameStateError::MissingComponent {
                entity: id,
                component: ComponentType::Move,
            })?;
        if !(speed > 0.0) {
            return Err(GameStateError::InvalidSpeed { entity: id, speed });
        }

        let position = entity
            .position_mut()
            .ok_or(GameStateError::MissingComponent {
                entity: id,
                component: ComponentType::Position,
            })?;
        let start = position
            .position_at(now)
            .ok_or(GameStateError::NotPlaced(id))?;

        let distance = start.distance(target);
        let arrival = now + (distance / speed) as f64;
        position.set_position(now, start);
        if distance > 0.0 {
            position.positions_mut().set_insert(arrival, target);
            let heading = target - start;
            let angle = heading.y.atan2(heading.x).to_degrees().rem_euclid(360.0);
            position.set_angle(now, angle);
        }
        entity.push_to_render();

        debug!(entity = %id, %arrival, "moving");
        self.event_log.push(GameEvent::Moved {
            id,
            from: start,
            to: target,
            departure: now,
            arrival,
        });
        Ok(arrival)
    }

    fn entity_mut(&mut self, id: EntityId) -> Result<&mut GameEntity, GameStateError> {
        self.entities
            .get_mut(&id)
            .ok_or(GameStateError::UnknownEntity(id))
    }
}
