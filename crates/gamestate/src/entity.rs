use std::sync::{Arc, Weak};
use strata_assets::AssetPath;
use strata_common::EntityId;
use strata_render::RenderEntity;
use tracing::{debug, trace};

use crate::component::{Component, ComponentType, Position};
use crate::storage::ComponentMap;

/// A simulated object: an id, its components, and an optional link to the
/// render stage.
///
/// The render link is weak. The render stage owns the proxy; once it drops
/// the proxy, pushes from this entity become no-ops.
#[derive(Debug)]
pub struct GameEntity {
    id: EntityId,
    animation_path: Option<AssetPath>,
    components: ComponentMap,
    render_entity: Option<Weak<dyn RenderEntity>>,
}

impl GameEntity {
    /// An entity without components and without a render link.
    pub fn new(id: EntityId, animation_path: Option<AssetPath>) -> Self {
        Self {
            id,
            animation_path,
            components: ComponentMap::new(),
            render_entity: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn animation_path(&self) -> Option<&AssetPath> {
        self.animation_path.as_ref()
    }

    /// Duplicate this entity under `id`.
    ///
    /// Components are cloned one by one so the copy owns its own state. The
    /// copy has no render link, whatever the state of this entity's link.
    pub fn copy(&self, id: EntityId) -> GameEntity {
        let mut copy = GameEntity::new(id, self.animation_path.clone());
        for component in self.components.iter() {
            copy.components.insert(component.clone());
        }
        debug!(source = %self.id, copy = %id, components = copy.components.len(), "entity copied");
        copy
    }

    /// Attach a component, replacing one of the same type.
    ///
    /// Does not push to the render stage, even for a position; the owner of
    /// the simulation loop decides when to resync.
    pub fn add_component(&mut self, component: impl Into<Component>) -> Option<Component> {
        let component = component.into();
        let ty = component.component_type();
        let replaced = self.components.insert(component);
        if replaced.is_some() {
            debug!(entity = %self.id, component = %ty, "component replaced");
        }
        replaced
    }

    pub fn has_component(&self, ty: ComponentType) -> bool {
        self.components.contains(ty)
    }

    pub fn component(&self, ty: ComponentType) -> Option<&Component> {
        self.components.get(ty)
    }

    pub fn component_mut(&mut self, ty: ComponentType) -> Option<&mut Component> {
        self.components.get_mut(ty)
    }

    pub fn components(&self) -> &ComponentMap {
        &self.components
    }

    pub fn position(&self) -> Option<&Position> {
        self.components.position()
    }

    pub fn position_mut(&mut self) -> Option<&mut Position> {
        self.components.position_mut()
    }

    /// Link this entity to a render proxy and push the current state once.
    ///
    /// Only a weak reference is kept; the caller keeps the proxy alive.
    pub fn set_render_entity(&mut self, proxy: Arc<dyn RenderEntity>) {
        self.render_entity = Some(Arc::downgrade(&proxy));
        debug!(entity = %self.id, "render entity linked");
        self.push_to_render();
    }

    /// Whether a render link was ever set.
    pub fn has_render_entity(&self) -> bool {
        self.render_entity.is_some()
    }

    /// Forward id, trajectory, orientation and animation path to the render
    /// proxy. Skips silently without a live link or without a position.
    pub fn push_to_render(&self) {
        let Some(link) = &self.render_entity else {
            return;
        };
        let Some(proxy) = link.upgrade() else {
            trace!(entity = %self.id, "render entity gone, skipping push");
            return;
        };
        let Some(position) = self.components.position() else {
            trace!(entity = %self.id, "no position, skipping push");
            return;
        };
        proxy.update(
            self.id,
            position.positions(),
            position.angles(),
            self.animation_path.as_ref(),
        );
    }
}
