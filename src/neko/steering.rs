use glam::Vec2;

use super::Viewport;

/// Distance covered per tick, in pixels.
pub const SPEED: f32 = 10.0;
/// Inside this radius the creature stays put.
pub const STOP_DISTANCE: f32 = 48.0;
/// Closest the sprite center may get to a viewport edge (half a tile).
pub const EDGE_MARGIN: f32 = 16.0;

/// Offset from the pointer to the creature, for a tick in which it should move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heading {
    /// `position - pointer`.
    pub offset: Vec2,
    pub distance: f32,
}

impl Heading {
    /// Returns `None` when the pointer is close enough that the creature rests.
    pub fn toward(pos: Vec2, pointer: Vec2) -> Option<Self> {
        let offset = pos - pointer;
        let distance = offset.length();
        if distance < SPEED || distance < STOP_DISTANCE {
            return None;
        }
        Some(Self { offset, distance })
    }

    /// Unit offset (`dx/distance`, `dy/distance`). Points away from the pointer.
    pub fn normalized(&self) -> Vec2 {
        self.offset / self.distance
    }
}

/// Step `SPEED` pixels toward the pointer and keep the sprite on screen.
pub fn advance(pos: Vec2, heading: &Heading, viewport: Viewport) -> Vec2 {
    clamp_to_viewport(pos - heading.normalized() * SPEED, viewport)
}

/// Clamp a center position into `[16, dim - 16]` on both axes.
///
/// The lower bound is applied first, so a viewport smaller than one tile pins
/// the sprite to `dim - 16` instead of panicking like `f32::clamp` would.
pub fn clamp_to_viewport(pos: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(
        pos.x.max(EDGE_MARGIN).min(viewport.width - EDGE_MARGIN),
        pos.y.max(EDGE_MARGIN).min(viewport.height - EDGE_MARGIN),
    )
}
