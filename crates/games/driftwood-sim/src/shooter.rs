use serde::{Deserialize, Serialize};

use driftwood_core::geom::{Rect, Vec2};
use driftwood_core::timer::Timer;

use crate::config::ShooterConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShooterState {
    Idle,
    Fire,
}

impl ShooterState {
    pub fn as_str(self) -> &'static str {
        match self {
            ShooterState::Idle => "idle",
            ShooterState::Fire => "fire",
        }
    }
}

/// Stationary enemy that fires a projectile at a target standing level
/// with it and in front of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Shooter {
    pub rect: Rect,
    pub old_rect: Rect,
    state: ShooterState,
    pub frame_index: f32,
    direction: f32,
    cooldown: Timer,
    has_fired: bool,
}

impl Shooter {
    /// Shooters face right unless `reverse` is set.
    pub fn new(rect: Rect, reverse: bool, config: &ShooterConfig) -> Self {
        Self {
            rect,
            old_rect: rect,
            state: ShooterState::Idle,
            frame_index: 0.0,
            direction: if reverse { -1.0 } else { 1.0 },
            cooldown: Timer::new(config.fire_cooldown_secs),
            has_fired: false,
        }
    }

    pub fn state(&self) -> ShooterState {
        self.state
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn has_fired(&self) -> bool {
        self.has_fired
    }

    pub fn cooling_down(&self) -> bool {
        self.cooldown.is_active()
    }

    pub fn update_timers(&mut self, now: f64) {
        self.cooldown.update(now);
    }

    /// Decide whether to open fire on `target` (a point, usually the
    /// player's hitbox center).
    pub fn think(&mut self, target: Vec2, now: f64, config: &ShooterConfig) {
        let own = self.rect.center();
        let near = own.distance_to(target) < config.sight_radius;
        let ahead = if self.direction > 0.0 {
            own.x < target.x
        } else {
            own.x > target.x
        };
        let level = (own.y - target.y).abs() < config.vertical_band;

        if near && ahead && level && !self.cooldown.is_active() {
            self.state = ShooterState::Fire;
            self.frame_index = 0.0;
            self.cooldown.start(now);
        }
    }

    /// Advance the current animation. Returns `true` on the single frame a
    /// fire cycle releases its projectile.
    pub fn animate(&mut self, dt: f32, speed: f32, frames: usize, config: &ShooterConfig) -> bool {
        self.frame_index += speed * dt;

        if self.frame_index < frames as f32 {
            if self.state == ShooterState::Fire
                && self.frame_index.floor() as usize == config.fire_frame
                && !self.has_fired
            {
                self.has_fired = true;
                return true;
            }
        } else {
            self.frame_index = 0.0;
            if self.state == ShooterState::Fire {
                self.state = ShooterState::Idle;
                self.has_fired = false;
            }
        }
        false
    }

    /// Frames are authored facing right.
    pub fn flip_x(&self) -> bool {
        self.direction < 0.0
    }
}
