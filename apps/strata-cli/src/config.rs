//! Scenario files: YAML descriptions of the entities a run starts with.

use anyhow::Context;
use glam::Vec3;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use strata_assets::{Animation, AssetPath};
use strata_common::Angle;
use strata_curve::Keyframe;

/// Built-in scenario used by `strata-cli demo`.
pub const DEMO_SCENARIO: &str = r#"
animations:
  - path: units/archer/walk.sprite
    frame_count: 10
    frame_rate: 10.0
    directions: 8
entities:
  - name: archer
    animation: units/archer/walk.sprite
    position:
      at: [0.0, 0.0, 0.0]
    owner: 1
    attributes:
      hp: 30
    idle: idle
    speed: 1.5
    waypoints:
      - [6.0, 0.0, 0.0]
      - [6.0, 6.0, 0.0]
    copies: 1
  - name: tree
    position:
      at: [3.0, -2.0, 0.0]
    despawn_at: 6.0
  - name: scout
    speed: 2.0
"#;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Animations registered with the render stage before the run.
    #[serde(default)]
    pub animations: Vec<Animation>,
    pub entities: Vec<EntitySpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntitySpec {
    pub name: String,
    #[serde(default)]
    pub animation: Option<AssetPath>,
    #[serde(default)]
    pub position: Option<PositionSpec>,
    #[serde(default)]
    pub owner: Option<u32>,
    #[serde(default)]
    pub attributes: BTreeMap<String, i64>,
    #[serde(default)]
    pub idle: Option<String>,
    /// Movement speed; entities without one cannot follow waypoints.
    #[serde(default)]
    pub speed: Option<f32>,
    #[serde(default)]
    pub waypoints: Vec<Vec3>,
    /// Extra duplicates of this entity, each with the same components.
    #[serde(default)]
    pub copies: u32,
    #[serde(default = "default_render")]
    pub render: bool,
    /// Simulated second at which the entity and its render object go away.
    #[serde(default)]
    pub despawn_at: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PositionSpec {
    #[serde(default)]
    pub at: Vec3,
    #[serde(default)]
    pub angle: Angle,
    /// Explicit trajectory. Overrides `at` when present.
    #[serde(default)]
    pub path: Vec<Keyframe<Vec3>>,
}

fn default_render() -> bool {
    true
}

impl Scenario {
    pub fn from_yaml(source: &str) -> anyhow::Result<Self> {
        let scenario: Self = serde_yaml::from_str(source).context("invalid scenario")?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::from_yaml(&source).with_context(|| format!("loading scenario {}", path.display()))
    }

    pub fn demo() -> anyhow::Result<Self> {
        Self::from_yaml(DEMO_SCENARIO)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for entity in &self.entities {
            if !entity.waypoints.is_empty() && entity.speed.is_none() {
                anyhow::bail!("entity {:?} has waypoints but no speed", entity.name);
            }
            if !entity.waypoints.is_empty() && entity.position.is_none() {
                anyhow::bail!("entity {:?} has waypoints but no position", entity.name);
            }
            if let Some(at) = entity.despawn_at {
                if !at.is_finite() || at < 0.0 {
                    anyhow::bail!("entity {:?} has invalid despawn time {at}", entity.name);
                }
            }
            if let Some(speed) = entity.speed {
                if !(speed > 0.0) {
                    anyhow::bail!("entity {:?} has non-positive speed {speed}", entity.name);
                }
            }
        }
        Ok(())
    }
}
