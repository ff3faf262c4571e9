use driftwood_core::geom::{Rect, Vec2};

/// A hazard swinging around a pivot on a rigid arm.
///
/// With an end angle it swings back and forth between the two angles;
/// without one it keeps circling. Angles are in degrees, measured with y
/// pointing down (so positive angles turn clockwise on screen).
#[derive(Debug, Clone, PartialEq)]
pub struct Spike {
    pub rect: Rect,
    pub old_rect: Rect,
    center: Vec2,
    radius: f32,
    speed: f32,
    start_angle: f32,
    end_angle: Option<f32>,
    angle: f32,
    direction: f32,
}

impl Spike {
    pub fn new(
        center: Vec2,
        size: Vec2,
        radius: f32,
        speed: f32,
        start_angle: f32,
        end_angle: Option<f32>,
    ) -> Self {
        let mut spike = Self {
            rect: Rect::from_center(center, size),
            old_rect: Rect::from_center(center, size),
            center,
            radius,
            speed,
            start_angle,
            end_angle,
            angle: start_angle,
            direction: 1.0,
        };
        spike.place();
        spike.old_rect = spike.rect;
        spike
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn update(&mut self, dt: f32) {
        self.angle += self.direction * self.speed * dt;
        if let Some(end) = self.end_angle {
            if self.angle >= end {
                self.direction = -1.0;
            }
            if self.angle < self.start_angle {
                self.direction = 1.0;
            }
        } else {
            self.angle = self.angle.rem_euclid(360.0);
        }
        self.place();
    }

    fn place(&mut self) {
        let rad = self.angle.to_radians();
        let pos = self.center + Vec2::new(rad.cos(), rad.sin()) * self.radius;
        self.rect.set_center(pos);
    }
}
