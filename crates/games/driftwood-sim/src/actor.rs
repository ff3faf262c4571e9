use serde::{Deserialize, Serialize};

use driftwood_core::geom::{Rect, Vec2};
use driftwood_core::layer::ZLayer;

use crate::animation::DEFAULT_STATE;
use crate::patrol::PatrolEnemy;
use crate::platform::MovingPlatform;
use crate::projectile::Projectile;
use crate::shooter::Shooter;
use crate::spike::Spike;

/// Stable handle for an actor. Ids are never reused within a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// The player always owns id 0.
pub const PLAYER_ID: ActorId = ActorId(0);

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Player,
    Tile,
    Prop,
    Decoration,
    Platform,
    Saw,
    Spike,
    PatrolEnemy,
    Shooter,
    Projectile,
}

bitflags::bitflags! {
    /// Collision groups an actor belongs to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Groups: u8 {
        /// Blocks movement on both axes.
        const SOLID      = 1 << 0;
        /// Blocks only downward landings.
        const SEMI_SOLID = 1 << 1;
        /// Hurts the player on contact.
        const DAMAGE     = 1 << 2;
        const PATROL     = 1 << 3;
        const PROJECTILE = 1 << 4;
    }
}

/// Geometry that never moves: tiles, props and decorations.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticBody {
    pub rect: Rect,
    pub frame_index: f32,
    pub flip_y: bool,
}

impl StaticBody {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            frame_index: 0.0,
            flip_y: false,
        }
    }
}

/// Per-kind motion and behavior.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Static(StaticBody),
    Platform(MovingPlatform),
    Spike(Spike),
    Patrol(PatrolEnemy),
    Shooter(Shooter),
    Projectile(Projectile),
}

/// Anything in the world other than the player.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    /// Sprite sheet name, used for frame counts and by the renderer.
    pub sprite: String,
    pub groups: Groups,
    pub z: ZLayer,
    /// Frames advanced per second; zero for stills.
    pub animation_speed: f32,
    pub body: Body,
}

impl Actor {
    pub fn rect(&self) -> Rect {
        match &self.body {
            Body::Static(b) => b.rect,
            Body::Platform(b) => b.rect,
            Body::Spike(b) => b.rect,
            Body::Patrol(b) => b.rect,
            Body::Shooter(b) => b.rect,
            Body::Projectile(b) => b.rect,
        }
    }

    pub fn old_rect(&self) -> Rect {
        match &self.body {
            Body::Static(b) => b.rect,
            Body::Platform(b) => b.old_rect,
            Body::Spike(b) => b.old_rect,
            Body::Patrol(b) => b.old_rect,
            Body::Shooter(b) => b.old_rect,
            Body::Projectile(b) => b.old_rect,
        }
    }

    /// Record the pose at the start of the tick. Called once per tick
    /// before anything moves.
    pub fn begin_tick(&mut self) {
        match &mut self.body {
            Body::Static(_) => {},
            Body::Platform(b) => b.old_rect = b.rect,
            Body::Spike(b) => b.old_rect = b.rect,
            Body::Patrol(b) => b.old_rect = b.rect,
            Body::Shooter(b) => b.old_rect = b.rect,
            Body::Projectile(b) => b.old_rect = b.rect,
        }
    }

    pub fn update_timers(&mut self, now: f64) {
        match &mut self.body {
            Body::Shooter(b) => b.update_timers(now),
            Body::Projectile(b) => b.update_timers(now),
            _ => {},
        }
    }

    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    /// Whether riders standing on this actor are carried along.
    pub fn is_moving(&self) -> bool {
        matches!(self.body, Body::Platform(_))
    }

    /// Step a moving actor will take over `dt`; zero for everything else.
    pub fn displacement(&self, dt: f32) -> Vec2 {
        match &self.body {
            Body::Platform(p) => p.displacement(dt),
            _ => Vec2::ZERO,
        }
    }

    pub fn is_projectile(&self) -> bool {
        self.kind == ActorKind::Projectile
    }

    pub fn in_group(&self, group: Groups) -> bool {
        self.groups.intersects(group)
    }

    /// Animation state name used to look up frame counts.
    pub fn state_name(&self) -> &'static str {
        match &self.body {
            Body::Shooter(b) => b.state().as_str(),
            _ => DEFAULT_STATE,
        }
    }

    pub fn frame_index(&self) -> f32 {
        match &self.body {
            Body::Static(b) => b.frame_index,
            Body::Platform(b) => b.frame_index,
            Body::Patrol(b) => b.frame_index,
            Body::Shooter(b) => b.frame_index,
            Body::Spike(_) | Body::Projectile(_) => 0.0,
        }
    }

    /// Advance looping animations. Shooters drive their own frames.
    pub fn animate(&mut self, dt: f32) {
        let step = self.animation_speed * dt;
        match &mut self.body {
            Body::Static(b) => b.frame_index += step,
            Body::Platform(b) => b.frame_index += step,
            Body::Patrol(b) => b.frame_index += step,
            Body::Shooter(_) | Body::Spike(_) | Body::Projectile(_) => {},
        }
    }

    /// Horizontal and vertical mirroring for the renderer.
    pub fn flip(&self) -> (bool, bool) {
        match &self.body {
            Body::Static(b) => (false, b.flip_y),
            Body::Platform(b) => b.flip_flags(),
            Body::Patrol(b) => (b.flip_x(), false),
            Body::Shooter(b) => (b.flip_x(), false),
            Body::Projectile(b) => (b.direction() < 0.0, false),
            Body::Spike(_) => (false, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crate_actor() -> Actor {
        Actor {
            id: ActorId(3),
            kind: ActorKind::Prop,
            sprite: "crate".into(),
            groups: Groups::SOLID,
            z: ZLayer::Main,
            animation_speed: 0.0,
            body: Body::Static(StaticBody::new(Rect::new(0.0, 0.0, 64.0, 64.0))),
        }
    }

    #[test]
    fn static_old_rect_tracks_rect() {
        let mut a = crate_actor();
        a.begin_tick();
        assert_eq!(a.old_rect(), a.rect());
        assert!(!a.is_moving());
    }

    #[test]
    fn platform_is_moving() {
        let platform = MovingPlatform::from_path_box(
            Rect::new(0.0, 0.0, 200.0, 20.0),
            Vec2::new(64.0, 16.0),
            100.0,
            false,
        );
        let a = Actor {
            body: Body::Platform(platform),
            kind: ActorKind::Platform,
            groups: Groups::SEMI_SOLID,
            ..crate_actor()
        };
        assert!(a.is_moving());
        assert_eq!(a.displacement(0.1), Vec2::new(10.0, 0.0));
        assert_eq!(crate_actor().displacement(0.1), Vec2::ZERO);
        assert!(a.in_group(Groups::SEMI_SOLID | Groups::SOLID));
        assert!(!a.in_group(Groups::DAMAGE));
    }

    #[test]
    fn begin_tick_snapshots_moving_bodies() {
        let projectile = Projectile::new(Vec2::new(100.0, 100.0), 1.0, 0.0, 24.0, 150.0, 5.0, 0.0);
        let mut a = Actor {
            kind: ActorKind::Projectile,
            groups: Groups::DAMAGE | Groups::PROJECTILE,
            body: Body::Projectile(projectile),
            ..crate_actor()
        };
        if let Body::Projectile(p) = &mut a.body {
            p.update(0.1);
        }
        assert_ne!(a.old_rect(), a.rect());
        a.begin_tick();
        assert_eq!(a.old_rect(), a.rect());
        assert!(a.is_projectile());
    }

    #[test]
    fn groups_compose() {
        let g = Groups::DAMAGE | Groups::PATROL;
        assert!(g.contains(Groups::DAMAGE));
        assert!(!g.contains(Groups::SOLID));
        assert_eq!(Groups::default(), Groups::empty());
    }
}
