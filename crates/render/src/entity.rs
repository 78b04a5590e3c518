use glam::Vec3;
use parking_lot::Mutex;
use strata_assets::AssetPath;
use strata_common::{Angle, EntityId};
use strata_curve::{Continuous, Discrete};
use tracing::trace;

/// Receiver of entity state snapshots.
///
/// Called from the simulation side, possibly while the render side reads the
/// same object, so implementors synchronize internally. Repeated calls with
/// the same snapshot must be harmless.
pub trait RenderEntity: Send + Sync {
    fn update(
        &self,
        id: EntityId,
        positions: &Continuous<Vec3>,
        angles: &Discrete<Angle>,
        animation_path: Option<&AssetPath>,
    );
}

/// The state a proxy received in its latest update.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderUpdate {
    pub ref_id: EntityId,
    pub positions: Continuous<Vec3>,
    pub angles: Discrete<Angle>,
    pub animation_path: Option<AssetPath>,
}

#[derive(Debug, Default)]
struct ProxyState {
    latest: Option<RenderUpdate>,
    changed: bool,
    update_count: u64,
}

/// Render-stage proxy for one simulated entity.
///
/// Updates overwrite each other; the stage only ever sees the newest one.
#[derive(Debug, Default)]
pub struct WorldRenderEntity {
    state: Mutex<ProxyState>,
}

impl WorldRenderEntity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an update arrived since the last [`fetch_updates`](Self::fetch_updates).
    pub fn is_changed(&self) -> bool {
        self.state.lock().changed
    }

    /// Take the newest snapshot if it has not been fetched yet.
    pub fn fetch_updates(&self) -> Option<RenderUpdate> {
        let mut state = self.state.lock();
        if !state.changed {
            return None;
        }
        state.changed = false;
        state.latest.clone()
    }

    /// Entity id of the latest update, if any arrived.
    pub fn ref_id(&self) -> Option<EntityId> {
        self.state.lock().latest.as_ref().map(|u| u.ref_id)
    }

    /// Total number of updates received.
    pub fn update_count(&self) -> u64 {
        self.state.lock().update_count
    }
}

impl RenderEntity for WorldRenderEntity {
    fn update(
        &self,
        id: EntityId,
        positions: &Continuous<Vec3>,
        angles: &Discrete<Angle>,
        animation_path: Option<&AssetPath>,
    ) {
        let snapshot = RenderUpdate {
            ref_id: id,
            positions: positions.clone(),
            angles: angles.clone(),
            animation_path: animation_path.cloned(),
        };
        let mut state = self.state.lock();
        state.latest = Some(snapshot);
        state.changed = true;
        state.update_count += 1;
        trace!(entity = %id, count = state.update_count, "render entity updated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use strata_common::Time;

    fn push(proxy: &WorldRenderEntity, id: u64, x: f32) {
        proxy.update(
            EntityId(id),
            &Continuous::with_initial(Time::ZERO, Vec3::new(x, 0.0, 0.0)),
            &Discrete::with_initial(Time::ZERO, 0.0),
            None,
        );
    }

    #[test]
    fn fresh_proxy_has_nothing() {
        let proxy = WorldRenderEntity::new();
        assert!(!proxy.is_changed());
        assert!(proxy.fetch_updates().is_none());
        assert_eq!(proxy.ref_id(), None);
    }

    #[test]
    fn fetch_clears_changed_flag() {
        let proxy = WorldRenderEntity::new();
        push(&proxy, 3, 1.0);
        assert!(proxy.is_changed());
        let update = proxy.fetch_updates().unwrap();
        assert_eq!(update.ref_id, EntityId(3));
        assert!(!proxy.is_changed());
        assert!(proxy.fetch_updates().is_none());
    }

    #[test]
    fn newest_update_wins() {
        let proxy = WorldRenderEntity::new();
        push(&proxy, 3, 1.0);
        push(&proxy, 3, 2.0);
        let update = proxy.fetch_updates().unwrap();
        assert_eq!(update.positions.get(Time::ZERO), Some(Vec3::new(2.0, 0.0, 0.0)));
        assert_eq!(proxy.update_count(), 2);
    }

    #[test]
    fn usable_as_trait_object_across_threads() {
        let proxy = Arc::new(WorldRenderEntity::new());
        let shared: Arc<dyn RenderEntity> = proxy.clone();
        let handle = std::thread::spawn(move || {
            shared.update(
                EntityId(9),
                &Continuous::new(),
                &Discrete::new(),
                Some(&AssetPath::new("a.sprite").unwrap()),
            );
        });
        handle.join().unwrap();
        assert_eq!(proxy.ref_id(), Some(EntityId(9)));
    }
}
