use glam::Vec3;
use std::collections::BTreeMap;
use std::sync::Arc;
use strata_assets::{AssetId, AssetPath, AssetStore};
use strata_common::{Angle, EntityId, Time};
use strata_curve::{Continuous, Discrete};
use tracing::{debug, trace};

use crate::entity::{RenderUpdate, WorldRenderEntity};

/// Render-side view of one entity, sampled at the stage's current time.
#[derive(Debug, Clone)]
pub struct WorldObject {
    pub id: EntityId,
    pub positions: Continuous<Vec3>,
    pub angles: Discrete<Angle>,
    pub animation_path: Option<AssetPath>,
    /// Registry entry for `animation_path`, if the stage knows it.
    pub animation: Option<AssetId>,
    pub position: Option<Vec3>,
    pub angle: Option<Angle>,
    pub frame: u32,
    pub direction: u32,
}

impl WorldObject {
    fn from_update(update: RenderUpdate, assets: &AssetStore) -> Self {
        let animation = update
            .animation_path
            .as_ref()
            .and_then(|path| assets.resolve(path));
        Self {
            id: update.ref_id,
            positions: update.positions,
            angles: update.angles,
            animation_path: update.animation_path,
            animation,
            position: None,
            angle: None,
            frame: 0,
            direction: 0,
        }
    }

    fn sample(&mut self, time: Time, assets: &AssetStore) {
        self.position = self.positions.get(time);
        self.angle = self.angles.get(time);
        let animation = self.animation.and_then(|id| assets.get_animation(id));
        match animation {
            Some(anim) => {
                let started = self
                    .positions
                    .keyframes()
                    .first()
                    .map_or(Time::ZERO, |k| k.time);
                self.frame = anim.frame_at(time - started);
                self.direction = anim.direction_for(self.angle.unwrap_or_default());
            }
            None => {
                self.frame = 0;
                self.direction = 0;
            }
        }
    }
}

/// Owner of all render proxies and the objects they feed.
///
/// The simulation pushes into proxies at any time; [`update`](Self::update)
/// pulls the pending snapshots once per frame.
#[derive(Debug, Default)]
pub struct WorldRenderStage {
    proxies: Vec<Arc<WorldRenderEntity>>,
    objects: BTreeMap<EntityId, WorldObject>,
    assets: AssetStore,
    time: Time,
}

impl WorldRenderStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assets(assets: AssetStore) -> Self {
        Self {
            assets,
            ..Default::default()
        }
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Time of the last [`update`](Self::update).
    pub fn time(&self) -> Time {
        self.time
    }

    /// Create a proxy owned by this stage.
    pub fn add_render_entity(&mut self) -> Arc<WorldRenderEntity> {
        let proxy = Arc::new(WorldRenderEntity::new());
        self.proxies.push(Arc::clone(&proxy));
        proxy
    }

    /// Drop `proxy` and the object it fed. Entities still linked to it
    /// silently stop syncing once no other holder keeps it alive.
    ///
    /// Returns `false` if the proxy does not belong to this stage.
    pub fn remove_render_entity(&mut self, proxy: &Arc<WorldRenderEntity>) -> bool {
        let before = self.proxies.len();
        self.proxies.retain(|p| !Arc::ptr_eq(p, proxy));
        if before == self.proxies.len() {
            return false;
        }
        match proxy.ref_id() {
            Some(id) => {
                self.objects.remove(&id);
                debug!(entity = %id, "render entity removed");
            }
            None => debug!("unused render entity removed"),
        }
        true
    }

    pub fn proxy_count(&self) -> usize {
        self.proxies.len()
    }

    /// Pull pending snapshots and sample every object at `time`.
    /// Returns the number of snapshots applied.
    pub fn update(&mut self, time: Time) -> usize {
        self.time = time;
        let mut applied = 0;
        for proxy in &self.proxies {
            if let Some(update) = proxy.fetch_updates() {
                trace!(entity = %update.ref_id, "applying render update");
                let object = WorldObject::from_update(update, &self.assets);
                self.objects.insert(object.id, object);
                applied += 1;
            }
        }
        for object in self.objects.values_mut() {
            object.sample(time, &self.assets);
        }
        applied
    }

    pub fn object(&self, id: EntityId) -> Option<&WorldObject> {
        self.objects.get(&id)
    }

    /// Objects in entity id order.
    pub fn objects(&self) -> impl Iterator<Item = &WorldObject> {
        self.objects.values()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}
