use serde::{Deserialize, Serialize};

use driftwood_core::geom::{Rect, Vec2};
use driftwood_core::intent::Intent;
use driftwood_core::timer::Timer;

use crate::actor::ActorId;
use crate::animation::AnimationSet;
use crate::collision::{CollisionIndex, resolve_horizontal, resolve_one_way, resolve_vertical};
use crate::config::PlayerConfig;

/// Sprite sheet name the player's frame counts are stored under.
pub const PLAYER_SPRITE: &str = "player";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    Idle,
    Run,
    Jump,
    Fall,
    Wall,
    Attack,
    AirAttack,
}

impl PlayerState {
    pub fn as_str(self) -> &'static str {
        match self {
            PlayerState::Idle => "idle",
            PlayerState::Run => "run",
            PlayerState::Jump => "jump",
            PlayerState::Fall => "fall",
            PlayerState::Wall => "wall",
            PlayerState::Attack => "attack",
            PlayerState::AirAttack => "air_attack",
        }
    }
}

/// Which surfaces the hitbox touched at the end of the last tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceContact {
    pub floor: bool,
    pub left: bool,
    pub right: bool,
}

impl SurfaceContact {
    pub fn any_wall(&self) -> bool {
        self.left || self.right
    }

    /// Touching one side wall but not both.
    pub fn single_wall(&self) -> bool {
        self.left != self.right
    }
}

/// Ability windows.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerTimers {
    /// Horizontal input lockout after a jump press.
    pub wall_jump: Timer,
    /// Blocks wall slide and wall jump right after a grounded jump.
    pub wall_slide_block: Timer,
    /// One-way platforms are ignored while open.
    pub platform_skip: Timer,
    /// Attack cooldown.
    pub attack_block: Timer,
}

impl PlayerTimers {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            wall_jump: Timer::new(config.wall_jump_secs),
            wall_slide_block: Timer::new(config.wall_slide_block_secs),
            platform_skip: Timer::new(config.platform_skip_secs),
            attack_block: Timer::new(config.attack_block_secs),
        }
    }

    pub fn update(&mut self, now: f64) {
        self.wall_jump.update(now);
        self.wall_slide_block.update(now);
        self.platform_skip.update(now);
        self.attack_block.update(now);
    }
}

/// Everything the player reads from the world during its update.
#[derive(Debug, Clone, Copy)]
pub struct PlayerContext<'a> {
    pub dt: f32,
    pub now: f64,
    pub config: &'a PlayerConfig,
    pub index: &'a CollisionIndex,
    pub underside_nudge: f32,
    pub animation_speed: f32,
    pub animations: &'a AnimationSet,
}

/// The player character.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Visible sprite rectangle, kept centered on the hitbox.
    pub rect: Rect,
    pub hitbox: Rect,
    /// Hitbox at the start of the current tick.
    pub old_hitbox: Rect,
    /// Horizontal intent in -1..=1, scaled by speed when moving.
    pub direction_x: f32,
    /// Vertical velocity (px/s, positive is down).
    pub velocity_y: f32,
    pub facing_right: bool,
    pub state: PlayerState,
    pub frame_index: f32,
    pub attacking: bool,
    pub contact: SurfaceContact,
    pub timers: PlayerTimers,
    pending_jump: bool,
    riding: Option<ActorId>,
}

impl Player {
    /// Spawn with the sprite's top-left corner at `pos`.
    pub fn new(pos: Vec2, config: &PlayerConfig) -> Self {
        let rect = Rect::from_top_left(pos, Vec2::new(config.sprite_width, config.sprite_height));
        let hitbox = rect.inflate(-config.hitbox_inset_x, -config.hitbox_inset_y);
        Self {
            rect,
            hitbox,
            old_hitbox: hitbox,
            direction_x: 0.0,
            velocity_y: 0.0,
            facing_right: true,
            state: PlayerState::Idle,
            frame_index: 0.0,
            attacking: false,
            contact: SurfaceContact::default(),
            timers: PlayerTimers::new(config),
            pending_jump: false,
            riding: None,
        }
    }

    /// Stand the hitbox's bottom-center on `feet`.
    pub fn place_feet(&mut self, feet: Vec2) {
        self.hitbox.set_mid_bottom(feet);
        self.old_hitbox = self.hitbox;
        self.rect.set_center(self.hitbox.center());
    }

    /// Moving obstacle the player stood on at the end of the last tick.
    pub fn riding(&self) -> Option<ActorId> {
        self.riding
    }

    pub fn begin_tick(&mut self) {
        self.old_hitbox = self.hitbox;
    }

    pub fn update_timers(&mut self, now: f64) {
        self.timers.update(now);
    }

    pub fn attack(&mut self, now: f64) {
        if !self.timers.attack_block.is_active() {
            self.attacking = true;
            self.frame_index = 0.0;
            self.timers.attack_block.start(now);
        }
    }

    /// Input, motion, collision, riding, contacts, state and animation for
    /// one tick. Timers and the old hitbox are handled by the caller first.
    pub fn update(&mut self, intent: &Intent, ctx: &PlayerContext<'_>) {
        self.input(intent, ctx.now);
        self.move_and_collide(ctx);
        self.ride(ctx);
        self.check_contact(ctx);
        self.rect.set_center(self.hitbox.center());
        self.update_state();
        self.animate(ctx);
    }

    fn input(&mut self, intent: &Intent, now: f64) {
        // Held jump keeps the lockout open, preserving wall-jump push-off
        if !self.timers.wall_jump.is_active() {
            if intent.move_right {
                self.facing_right = true;
            }
            if intent.move_left {
                self.facing_right = false;
            }
            if intent.move_down {
                self.timers.platform_skip.start(now);
            }
            if intent.attack {
                self.attack(now);
            }
            self.direction_x = intent.horizontal();
        }

        if intent.jump {
            self.pending_jump = true;
            self.timers.wall_jump.start(now);
        }
    }

    fn move_and_collide(&mut self, ctx: &PlayerContext<'_>) {
        let cfg = ctx.config;
        let dt = ctx.dt;

        self.hitbox.x += self.direction_x * cfg.speed * dt;
        resolve_horizontal(&mut self.hitbox, &self.old_hitbox, ctx.index.solids());

        let wall_slide = !self.contact.floor
            && self.contact.single_wall()
            && !self.timers.wall_slide_block.is_active();
        if wall_slide {
            self.velocity_y = 0.0;
            self.hitbox.y += cfg.gravity / cfg.wall_slide_divisor * dt;
        } else {
            self.velocity_y += cfg.gravity / 2.0 * dt;
            self.hitbox.y += self.velocity_y * dt;
            self.velocity_y += cfg.gravity / 2.0 * dt;
        }

        if self.pending_jump {
            if self.contact.floor {
                self.velocity_y = -cfg.jump_height;
                self.timers.wall_slide_block.start(ctx.now);
                self.hitbox.y -= cfg.jump_nudge;
            } else if self.contact.single_wall() && !self.timers.wall_slide_block.is_active() {
                self.velocity_y = -cfg.jump_height;
                self.direction_x = if self.contact.left { 1.0 } else { -1.0 };
            }
            self.pending_jump = false;
        }

        resolve_vertical(
            &mut self.hitbox,
            &self.old_hitbox,
            &mut self.velocity_y,
            ctx.index.solids(),
            ctx.underside_nudge,
        );
        if !self.timers.platform_skip.is_active() {
            resolve_one_way(
                &mut self.hitbox,
                &self.old_hitbox,
                &mut self.velocity_y,
                ctx.index.semi_solids(),
            );
        }
    }

    fn floor_probe(&self, depth: f32) -> Rect {
        Rect::from_top_left(self.hitbox.bottom_left(), Vec2::new(self.hitbox.w, depth))
    }

    /// Attach to a moving obstacle under the feet and add the step it will
    /// take this tick. Recomputed from scratch every tick.
    fn ride(&mut self, ctx: &PlayerContext<'_>) {
        self.riding = None;
        if self.velocity_y < 0.0 {
            return;
        }
        let probe = self.floor_probe(ctx.config.probe_depth);
        if let Some(platform) = ctx.index.moving_under(&probe) {
            self.riding = Some(platform.id);
            self.hitbox.translate(platform.displacement);
        }
    }

    fn check_contact(&mut self, ctx: &PlayerContext<'_>) {
        let depth = ctx.config.probe_depth;
        let floor = self.floor_probe(depth);
        let side_top = self.hitbox.top() + self.hitbox.h / 4.0;
        let side = Vec2::new(depth, self.hitbox.h / 2.0);
        let left = Rect::from_top_left(Vec2::new(self.hitbox.left() - depth, side_top), side);
        let right = Rect::from_top_left(Vec2::new(self.hitbox.right(), side_top), side);

        let index = ctx.index;
        let settled = self.velocity_y >= 0.0;
        self.contact = SurfaceContact {
            floor: index.hits_solid(&floor)
                || (settled && index.hits_semi_solid(&floor))
                || (settled && self.riding.is_some()),
            left: index.hits_solid(&left),
            right: index.hits_solid(&right),
        };
    }

    fn update_state(&mut self) {
        self.state = if self.contact.floor {
            if self.attacking {
                PlayerState::Attack
            } else if self.direction_x == 0.0 {
                PlayerState::Idle
            } else {
                PlayerState::Run
            }
        } else if self.attacking {
            PlayerState::AirAttack
        } else if self.contact.any_wall() {
            PlayerState::Wall
        } else if self.velocity_y < 0.0 {
            PlayerState::Jump
        } else {
            PlayerState::Fall
        };
    }

    fn animate(&mut self, ctx: &PlayerContext<'_>) {
        self.frame_index += ctx.animation_speed * ctx.dt;

        if matches!(self.state, PlayerState::Attack | PlayerState::AirAttack) {
            let frames = ctx.animations.frame_count(PLAYER_SPRITE, self.state.as_str());
            if self.frame_index >= frames as f32 {
                self.attacking = false;
                if self.state == PlayerState::Attack {
                    self.state = PlayerState::Idle;
                }
            }
        }
    }
}
