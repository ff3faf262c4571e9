use driftwood_core::geom::{Rect, Vec2};

/// Ground enemy walking back and forth along a ledge.
///
/// Turn-around probes test against the solid rectangles captured when the
/// enemy was spawned, so terrain that moves or appears later is ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct PatrolEnemy {
    pub rect: Rect,
    pub old_rect: Rect,
    direction: f32,
    speed: f32,
    terrain: Vec<Rect>,
    pub frame_index: f32,
}

impl PatrolEnemy {
    /// `direction` is clamped to -1 or 1.
    pub fn new(rect: Rect, direction: f32, speed: f32, terrain: Vec<Rect>) -> Self {
        Self {
            rect,
            old_rect: rect,
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
            speed,
            terrain,
            frame_index: 0.0,
        }
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    /// Walk one step. Returns `true` when the enemy turned around.
    pub fn update(&mut self, dt: f32) -> bool {
        self.rect.x += self.direction * self.speed * dt;

        let floor_ahead = if self.direction > 0.0 {
            Rect::from_top_left(self.rect.bottom_right(), Vec2::new(1.0, 1.0))
        } else {
            Rect::from_top_left(
                self.rect.bottom_left() - Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
            )
        };
        let wall_ahead = if self.direction > 0.0 {
            Rect::new(self.rect.right(), self.rect.top(), 1.0, self.rect.h - 1.0)
        } else {
            Rect::new(self.rect.left() - 1.0, self.rect.top(), 1.0, self.rect.h - 1.0)
        };

        let ledge = !floor_ahead.overlaps_any(&self.terrain);
        let blocked = wall_ahead.overlaps_any(&self.terrain);
        if ledge || blocked {
            self.direction = -self.direction;
            true
        } else {
            false
        }
    }

    /// Sprites face right by default; a left-walking enemy is mirrored.
    pub fn flip_x(&self) -> bool {
        self.direction < 0.0
    }
}
