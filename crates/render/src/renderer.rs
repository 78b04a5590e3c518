use glam::{Vec2, Vec3};

use crate::stage::WorldRenderStage;

/// Camera configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// World-space point at the center of the screen.
    pub camera: Vec3,
    /// Screen units per world unit.
    pub zoom: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            camera: Vec3::ZERO,
            zoom: 1.0,
        }
    }
}

impl RenderView {
    /// Top-down projection of a world position onto the screen plane.
    pub fn project(&self, position: Vec3) -> Vec2 {
        let rel = (position - self.camera) * self.zoom;
        Vec2::new(rel.x, rel.y)
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the stage's sampled objects. It never touches the
/// simulation; the stage is the only input.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the stage's current state.
    fn render(&self, stage: &WorldRenderStage, view: &RenderView) -> Self::Output;
}

/// Text renderer for CLI output, logging, and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, stage: &WorldRenderStage, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Render Stage (time={}) ===\n", stage.time()));
        out.push_str(&format!("Objects: {}\n", stage.object_count()));
        out.push_str(&format!(
            "Camera: ({:.1}, {:.1}, {:.1}) zoom={:.2}\n",
            view.camera.x, view.camera.y, view.camera.z, view.zoom
        ));

        for obj in stage.objects() {
            let Some(p) = obj.position else {
                out.push_str(&format!("  [{}] not placed yet\n", obj.id));
                continue;
            };
            let screen = view.project(p);
            let anim = obj
                .animation_path
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string);
            out.push_str(&format!(
                "  [{}] pos=({:.2}, {:.2}, {:.2}) screen=({:.1}, {:.1}) angle={:.0} anim={} frame={} dir={}\n",
                obj.id,
                p.x,
                p.y,
                p.z,
                screen.x,
                screen.y,
                obj.angle.unwrap_or_default(),
                anim,
                obj.frame,
                obj.direction
            ));
        }

        out
    }
}
