// Rendering port. The world never draws; this is the only place surface
// state is touched.

use crate::domain::world::World;

pub const ARENA_BACKDROP: &str = "lightblue";

/// Minimal drawing surface contract: a rectangle that can be cleared and
/// blitted onto. Coordinates are top-left based, like a canvas.
pub trait RenderSurface {
    fn size(&self) -> (f32, f32);
    fn clear(&mut self, color: &str);
    fn draw_image(&mut self, asset: &str, x: f32, y: f32);
}

/// Clears the surface and draws every live entity, floor-anchored: an entity
/// at y=0 sits on the bottom edge. Entities whose sprite has not reported
/// dimensions yet are skipped for the frame.
pub fn render_world(world: &World, surface: &mut dyn RenderSurface) {
    let (_, surface_height) = surface.size();
    surface.clear(ARENA_BACKDROP);
    for entity in world.entities() {
        if !entity.ready {
            continue;
        }
        surface.draw_image(
            &entity.visual,
            entity.x,
            surface_height - entity.height - entity.y,
        );
    }
}

/// Surface that swallows all draw calls; used by headless runs.
#[derive(Debug, Clone, Copy)]
pub struct NullSurface {
    width: f32,
    height: f32,
}

impl NullSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl RenderSurface for NullSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self, _color: &str) {}

    fn draw_image(&mut self, _asset: &str, _x: f32, _y: f32) {}
}
