//! Render stage: the consumer side of entity synchronization.
//!
//! # Invariants
//! - The render stage never mutates simulation state. It only receives
//!   snapshots through [`RenderEntity::update`].
//! - Proxies are owned by the stage. Simulation entities hold weak links.
//! - Every proxy guards its own state; callers need no external locking.

mod entity;
mod renderer;
mod stage;

pub use entity::{RenderEntity, RenderUpdate, WorldRenderEntity};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use stage::{WorldObject, WorldRenderStage};

pub fn crate_info() -> &'static str {
    "strata-render v0.1.0"
}
