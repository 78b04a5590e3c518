//! Asset references and the animation registry.
//!
//! Simulation code only ever carries [`AssetPath`]s. The render stage resolves
//! them to content-addressed [`AssetId`]s through an [`AssetStore`].
//!
//! # Layout
//! The registry can be persisted to disk as JSON for inspection.

mod path;

pub use path::AssetPath;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Content-addressed asset ID computed from the animation metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

/// Metadata of a sprite animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub path: AssetPath,
    pub frame_count: u32,
    pub frame_rate: f32,
    /// Number of facing directions the sprite sheet provides.
    pub directions: u32,
}

impl Animation {
    /// Single-frame, single-direction placeholder for `path`.
    pub fn still(path: AssetPath) -> Self {
        Self {
            path,
            frame_count: 1,
            frame_rate: 0.0,
            directions: 1,
        }
    }

    /// Frame shown `elapsed` seconds into the animation, looping.
    pub fn frame_at(&self, elapsed: f64) -> u32 {
        if self.frame_count <= 1 || self.frame_rate <= 0.0 || elapsed <= 0.0 {
            return 0;
        }
        ((elapsed * self.frame_rate as f64) as u64 % self.frame_count as u64) as u32
    }

    /// Sprite direction index for a facing angle in degrees.
    pub fn direction_for(&self, angle: f32) -> u32 {
        if self.directions <= 1 {
            return 0;
        }
        let sector = 360.0 / self.directions as f32;
        let normalized = angle.rem_euclid(360.0);
        ((normalized + sector / 2.0) / sector) as u32 % self.directions
    }
}

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid asset path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },
    #[error("no animation registered for {0}")]
    NotFound(AssetPath),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Content-addressed animation registry.
///
/// One animation per path; registering a path again replaces its entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetStore {
    animations: BTreeMap<AssetId, Animation>,
    by_path: BTreeMap<AssetPath, AssetId>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an animation and return its asset ID.
    pub fn register_animation(&mut self, animation: Animation) -> AssetId {
        let id = content_hash(&animation);
        if let Some(old) = self.by_path.insert(animation.path.clone(), id) {
            if old != id {
                debug!(path = %animation.path, ?old, new = ?id, "replacing animation");
                self.animations.remove(&old);
            }
        }
        self.animations.insert(id, animation);
        id
    }

    /// Look up the asset registered for `path`.
    pub fn resolve(&self, path: &AssetPath) -> Option<AssetId> {
        self.by_path.get(path).copied()
    }

    pub fn get_animation(&self, id: AssetId) -> Option<&Animation> {
        self.animations.get(&id)
    }

    pub fn animation_for(&self, path: &AssetPath) -> Result<&Animation, AssetError> {
        self.resolve(path)
            .and_then(|id| self.animations.get(&id))
            .ok_or_else(|| AssetError::NotFound(path.clone()))
    }

    /// Number of registered animations.
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetId, &Animation)> {
        self.animations.iter().map(|(id, a)| (*id, a))
    }

    /// Save the registry to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a registry from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let file = std::fs::File::open(path)?;
        let store: Self = serde_json::from_reader(file)?;
        Ok(store)
    }
}

pub fn crate_info() -> &'static str {
    "strata-assets v0.1.0"
}

fn content_hash(animation: &Animation) -> AssetId {
    let mut hasher = Sha256::new();
    hasher.update(animation.path.as_str().as_bytes());
    hasher.update(animation.frame_count.to_le_bytes());
    hasher.update(animation.frame_rate.to_le_bytes());
    hasher.update(animation.directions.to_le_bytes());
    let result = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&result[..8]);
    AssetId(u64::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk() -> Animation {
        Animation {
            path: AssetPath::new("units/archer/walk.sprite").unwrap(),
            frame_count: 10,
            frame_rate: 20.0,
            directions: 8,
        }
    }

    #[test]
    fn register_and_resolve() {
        let mut store = AssetStore::new();
        let id = store.register_animation(walk());
        assert_eq!(store.resolve(&walk().path), Some(id));
        assert_eq!(store.get_animation(id).unwrap().frame_count, 10);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn content_addressed_dedup() {
        let mut store = AssetStore::new();
        let id1 = store.register_animation(walk());
        let id2 = store.register_animation(walk());
        assert_eq!(id1, id2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn reregistering_path_replaces_entry() {
        let mut store = AssetStore::new();
        let old = store.register_animation(walk());
        let new = store.register_animation(Animation {
            frame_count: 12,
            ..walk()
        });
        assert_ne!(old, new);
        assert_eq!(store.len(), 1);
        assert!(store.get_animation(old).is_none());
        assert_eq!(store.resolve(&walk().path), Some(new));
    }

    #[test]
    fn missing_animation_is_not_found() {
        let store = AssetStore::new();
        let path = AssetPath::new("missing.sprite").unwrap();
        assert!(matches!(
            store.animation_for(&path),
            Err(AssetError::NotFound(p)) if p == path
        ));
    }

    #[test]
    fn frame_and_direction_selection() {
        let a = walk();
        assert_eq!(a.frame_at(0.0), 0);
        assert_eq!(a.frame_at(0.25), 5);
        assert_eq!(a.frame_at(0.5), 0);
        assert_eq!(a.direction_for(0.0), 0);
        assert_eq!(a.direction_for(90.0), 2);
        assert_eq!(a.direction_for(-45.0), 7);
        assert_eq!(Animation::still(a.path.clone()).direction_for(123.0), 0);
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut store = AssetStore::new();
        let id = store.register_animation(walk());
        store.register_animation(Animation::still(AssetPath::new("props/tree.sprite").unwrap()));
        store.save(tmp.path()).unwrap();

        let loaded = AssetStore::load(tmp.path()).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.resolve(&walk().path), Some(id));
    }
}
