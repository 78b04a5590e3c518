use std::sync::atomic::{AtomicU64, Ordering};
use strata_assets::AssetPath;
use strata_common::EntityId;

use crate::entity::GameEntity;

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

/// Hands out entity ids that are unique within the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityFactory;

impl EntityFactory {
    pub fn next_id() -> EntityId {
        EntityId(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// A new entity under a fresh id.
    pub fn create(animation_path: Option<AssetPath>) -> GameEntity {
        GameEntity::new(Self::next_id(), animation_path)
    }

    /// A copy of `source` under a fresh id.
    pub fn duplicate(source: &GameEntity) -> GameEntity {
        source.copy(Self::next_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| (0..100).map(|_| EntityFactory::next_id()).collect::<Vec<_>>()))
            .collect();
        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 400);
    }

    #[test]
    fn duplicate_gets_fresh_id() {
        let source = EntityFactory::create(None);
        let copy = EntityFactory::duplicate(&source);
        assert_ne!(source.id(), copy.id());
    }
}
