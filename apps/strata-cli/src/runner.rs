//! Drives a scenario: builds the game state, links entities to the render
//! stage and walks the simulation clock forward.

use anyhow::Context;
use glam::Vec3;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use strata_assets::AssetStore;
use strata_common::{EntityId, PlayerId, Time};
use strata_curve::{Continuous, Discrete};
use strata_gamestate::{EntityFactory, GameEntity, GameState, Idle, Live, Move, Ownership, Position};
use strata_render::{DebugTextRenderer, RenderView, Renderer, WorldRenderEntity, WorldRenderStage};
use tracing::{debug, info, warn};

use crate::config::{EntitySpec, Scenario};

#[derive(Debug, Default)]
struct Route {
    waypoints: VecDeque<Vec3>,
    busy_until: Option<Time>,
}

pub struct Simulation {
    state: GameState,
    stage: WorldRenderStage,
    routes: BTreeMap<EntityId, Route>,
    names: BTreeMap<EntityId, String>,
    proxies: BTreeMap<EntityId, Arc<WorldRenderEntity>>,
    despawns: BTreeMap<EntityId, Time>,
}

impl Simulation {
    pub fn from_scenario(scenario: &Scenario) -> anyhow::Result<Self> {
        let mut assets = AssetStore::new();
        for animation in &scenario.animations {
            assets.register_animation(animation.clone());
        }

        let mut sim = Self {
            state: GameState::new(),
            stage: WorldRenderStage::with_assets(assets),
            routes: BTreeMap::new(),
            names: BTreeMap::new(),
            proxies: BTreeMap::new(),
            despawns: BTreeMap::new(),
        };

        for spec in &scenario.entities {
            if let Some(path) = &spec.animation {
                if let Err(err) = sim.stage.assets().animation_for(path) {
                    warn!(entity = %spec.name, %err, "animation will not be drawn");
                }
            }
            let entity = build_entity(spec);
            let copies: Vec<GameEntity> = (0..spec.copies)
                .map(|_| EntityFactory::duplicate(&entity))
                .collect();
            for entity in std::iter::once(entity).chain(copies) {
                sim.add(spec, entity)
                    .with_context(|| format!("adding entity {:?}", spec.name))?;
            }
        }
        info!(
            entities = sim.state.entity_count(),
            proxies = sim.stage.proxy_count(),
            "scenario loaded"
        );
        Ok(sim)
    }

    fn add(&mut self, spec: &EntitySpec, entity: GameEntity) -> anyhow::Result<()> {
        let id = entity.id();
        self.state.insert(entity)?;
        if spec.render {
            let proxy = self.stage.add_render_entity();
            self.state.link_render_entity(id, proxy.clone())?;
            self.proxies.insert(id, proxy);
        }
        if let Some(at) = spec.despawn_at {
            self.despawns.insert(id, Time::from_secs(at));
        }
        if !spec.waypoints.is_empty() {
            self.routes.insert(
                id,
                Route {
                    waypoints: spec.waypoints.iter().copied().collect(),
                    busy_until: None,
                },
            );
        }
        self.names.insert(id, spec.name.clone());
        Ok(())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn stage(&self) -> &WorldRenderStage {
        &self.stage
    }

    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Remove an entity together with its route and render proxy.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        self.routes.remove(&id);
        self.despawns.remove(&id);
        if let Some(proxy) = self.proxies.remove(&id) {
            self.stage.remove_render_entity(&proxy);
        }
        let removed = self.state.despawn(id).is_some();
        if removed {
            info!(entity = %id, "despawned");
        }
        removed
    }

    /// Advance to `to`, despawn expired entities, start the next leg of every
    /// idle route and let the render stage pull the new state. Returns the
    /// number of render updates.
    ///
    /// Routes of entities without a position at `to` wait until they are placed.
    pub fn step(&mut self, to: Time) -> anyhow::Result<usize> {
        self.state.advance(to);
        let expired: Vec<EntityId> = self
            .despawns
            .iter()
            .filter(|(_, at)| **at <= to)
            .map(|(id, _)| *id)
            .collect();
        for id in expired {
            self.despawn(id);
        }

        for (id, route) in &mut self.routes {
            if route.busy_until.is_some_and(|t| to < t) {
                continue;
            }
            let placed = self
                .state
                .get(*id)
                .and_then(|e| e.position())
                .and_then(|p| p.position_at(to))
                .is_some();
            if !placed {
                continue;
            }
            let Some(target) = route.waypoints.pop_front() else {
                route.busy_until = None;
                continue;
            };
            let arrival = self
                .state
                .move_entity(*id, target)
                .with_context(|| format!("moving entity {id}"))?;
            debug!(entity = %id, %arrival, "next waypoint");
            route.busy_until = Some(arrival);
        }
        Ok(self.stage.update(to))
    }

    pub fn render(&self, view: &RenderView) -> String {
        DebugTextRenderer::new().render(&self.stage, view)
    }
}

fn build_entity(spec: &EntitySpec) -> GameEntity {
    let mut entity = EntityFactory::create(spec.animation.clone());
    if let Some(placement) = &spec.position {
        let position = if placement.path.is_empty() {
            Position::new(Time::ZERO, placement.at, placement.angle)
        } else {
            let positions = Continuous::from(placement.path.clone());
            let start = positions
                .keyframes()
                .first()
                .map_or(Time::ZERO, |k| k.time);
            Position::from_curves(positions, Discrete::with_initial(start, placement.angle))
        };
        entity.add_component(position);
    }
    if let Some(owner) = spec.owner {
        entity.add_component(Ownership::new(Time::ZERO, PlayerId(owner)));
    }
    if !spec.attributes.is_empty() {
        let mut live = Live::new();
        for (name, value) in &spec.attributes {
            live.add_attribute(Time::ZERO, name.as_str(), *value);
        }
        entity.add_component(live);
    }
    if let Some(idle) = &spec.idle {
        entity.add_component(Idle::new(idle.as_str()));
    }
    if let Some(speed) = spec.speed {
        entity.add_component(Move::new("move", speed));
    }
    entity
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_gamestate::ComponentType;

    fn demo() -> Simulation {
        Simulation::from_scenario(&Scenario::demo().unwrap()).unwrap()
    }

    #[test]
    fn demo_builds_every_entity() {
        let sim = demo();
        // archer + one copy, tree, scout
        assert_eq!(sim.state().entity_count(), 4);
        assert_eq!(sim.stage().proxy_count(), 4);
        let archers: Vec<&GameEntity> = sim
            .state()
            .entities()
            .values()
            .filter(|e| sim.name(e.id()) == Some("archer"))
            .collect();
        assert_eq!(archers.len(), 2);
        for archer in archers {
            assert!(archer.has_component(ComponentType::Live));
            assert!(archer.has_component(ComponentType::Ownership));
            assert!(archer.has_render_entity());
        }
    }

    #[test]
    fn unplaced_entities_never_reach_the_stage() {
        let mut sim = demo();
        sim.step(Time::ZERO).unwrap();
        // scout has no position component
        assert_eq!(sim.stage().object_count(), 3);
    }

    #[test]
    fn routes_are_walked_leg_by_leg() {
        let mut sim = demo();
        let archer = sim
            .state()
            .entities()
            .keys()
            .copied()
            .find(|id| sim.name(*id) == Some("archer"))
            .unwrap();

        sim.step(Time::ZERO).unwrap();
        sim.step(Time(2.0)).unwrap();
        let obj = sim.stage().object(archer).unwrap();
        assert_eq!(obj.position, Some(Vec3::new(3.0, 0.0, 0.0)));

        // first leg (6 units at 1.5/s) ends at t=4, second leg starts there
        sim.step(Time(4.0)).unwrap();
        sim.step(Time(6.0)).unwrap();
        let obj = sim.stage().object(archer).unwrap();
        assert_eq!(obj.position, Some(Vec3::new(6.0, 3.0, 0.0)));
    }

    fn find(sim: &Simulation, name: &str) -> EntityId {
        sim.state()
            .entities()
            .keys()
            .copied()
            .find(|id| sim.name(*id) == Some(name))
            .unwrap()
    }

    #[test]
    fn route_waits_until_entity_is_placed() {
        let yaml = r#"
entities:
  - name: late
    position:
      path:
        - { time: 2.0, value: [0.0, 0.0, 0.0] }
    speed: 1.0
    waypoints:
      - [4.0, 0.0, 0.0]
"#;
        let mut sim = Simulation::from_scenario(&Scenario::from_yaml(yaml).unwrap()).unwrap();
        let late = find(&sim, "late");

        sim.step(Time::ZERO).unwrap();
        assert_eq!(sim.stage().object(late).unwrap().position, None);

        sim.step(Time(2.0)).unwrap();
        sim.step(Time(4.0)).unwrap();
        let obj = sim.stage().object(late).unwrap();
        assert_eq!(obj.position, Some(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn expired_entities_are_despawned() {
        let mut sim = demo();
        let tree = find(&sim, "tree");
        sim.step(Time::ZERO).unwrap();
        assert!(sim.stage().object(tree).is_some());

        sim.step(Time(6.0)).unwrap();
        assert!(sim.state().get(tree).is_none());
        assert!(sim.stage().object(tree).is_none());
        assert_eq!(sim.state().entity_count(), 3);
        assert_eq!(sim.stage().proxy_count(), 3);
    }

    #[test]
    fn despawning_unplaced_entity_releases_its_proxy() {
        let mut sim = demo();
        let scout = find(&sim, "scout");
        sim.step(Time::ZERO).unwrap();
        assert!(sim.despawn(scout));
        assert_eq!(sim.stage().proxy_count(), 3);
        assert_eq!(sim.stage().object_count(), 3);
        assert!(!sim.despawn(scout));
    }

    #[test]
    fn render_lists_objects() {
        let mut sim = demo();
        sim.step(Time(1.0)).unwrap();
        let out = sim.render(&RenderView::default());
        assert!(out.contains("Objects: 3"));
        assert!(out.contains("anim=units/archer/walk.sprite"));
    }
}
