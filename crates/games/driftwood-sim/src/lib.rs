pub mod actor;
pub mod animation;
pub mod collision;
pub mod config;
pub mod error;
pub mod events;
pub mod level;
pub mod patrol;
pub mod platform;
pub mod player;
pub mod projectile;
pub mod resolver;
pub mod shooter;
pub mod snapshot;
pub mod spike;

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use driftwood_core::geom::{Rect, Vec2};
use driftwood_core::intent::Intent;
use driftwood_core::layer::ZLayer;
use driftwood_core::simulation::Simulation;

use actor::{Actor, ActorId, ActorKind, Body, Groups, PLAYER_ID, StaticBody};
use animation::{AnimationSet, visible_frame};
use collision::{CollisionIndex, Obstacle};
use config::SimConfig;
use events::{RemovalReason, SimEvent, SpawnRequest};
use patrol::PatrolEnemy;
use platform::MovingPlatform;
use player::{PLAYER_SPRITE, Player, PlayerContext};
use projectile::Projectile;
use shooter::Shooter;
use snapshot::{RenderFrame, RenderItem};
use spike::Spike;

/// Sprite name for projectiles fired by shooters.
pub const PROJECTILE_SPRITE: &str = "pearl";

/// A running level: the player plus every other actor, advanced one tick
/// at a time.
pub struct World {
    config: SimConfig,
    animations: AnimationSet,
    player: Player,
    actors: BTreeMap<ActorId, Actor>,
    next_id: u32,
    elapsed: f64,
    rng: StdRng,
}

impl World {
    /// Empty world with the player's sprite at the origin. `seed` drives
    /// every random choice made while spawning.
    pub fn new(config: SimConfig, animations: AnimationSet, seed: u64) -> Self {
        let player = Player::new(Vec2::ZERO, &config.player);
        Self {
            config,
            animations,
            player,
            actors: BTreeMap::new(),
            next_id: PLAYER_ID.0 + 1,
            elapsed: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn animations(&self) -> &AnimationSet {
        &self.animations
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    pub fn actors_of_kind(&self, kind: ActorKind) -> impl Iterator<Item = &Actor> {
        self.actors.values().filter(move |a| a.kind == kind)
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Place the player's sprite with its top-left corner at `pos`.
    pub fn place_player(&mut self, pos: Vec2) {
        self.player = Player::new(pos, &self.config.player);
    }

    fn alloc_id(&mut self) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn(
        &mut self,
        kind: ActorKind,
        sprite: &str,
        groups: Groups,
        z: ZLayer,
        animation_speed: f32,
        body: Body,
    ) -> ActorId {
        let id = self.alloc_id();
        self.actors.insert(
            id,
            Actor {
                id,
                kind,
                sprite: sprite.to_string(),
                groups,
                z,
                animation_speed,
                body,
            },
        );
        id
    }

    /// Solid terrain tile.
    pub fn spawn_tile(&mut self, rect: Rect) -> ActorId {
        self.spawn(
            ActorKind::Tile,
            "terrain",
            Groups::SOLID,
            ZLayer::Main,
            0.0,
            Body::Static(StaticBody::new(rect)),
        )
    }

    /// One-way tile.
    pub fn spawn_ledge(&mut self, rect: Rect) -> ActorId {
        self.spawn(
            ActorKind::Tile,
            "platforms",
            Groups::SEMI_SOLID,
            ZLayer::Main,
            0.0,
            Body::Static(StaticBody::new(rect)),
        )
    }

    /// Moving platform when `rideable`, otherwise a moving saw.
    pub fn spawn_platform(
        &mut self,
        sprite: &str,
        platform: MovingPlatform,
        rideable: bool,
    ) -> ActorId {
        let (kind, groups) = if rideable {
            (ActorKind::Platform, Groups::SEMI_SOLID)
        } else {
            (ActorKind::Saw, Groups::DAMAGE)
        };
        let speed = self.config.world.animation_speed;
        self.spawn(kind, sprite, groups, ZLayer::Main, speed, Body::Platform(platform))
    }

    pub fn spawn_spike(&mut self, spike: Spike) -> ActorId {
        self.spawn(
            ActorKind::Spike,
            "spike",
            Groups::DAMAGE,
            ZLayer::Main,
            0.0,
            Body::Spike(spike),
        )
    }

    /// Patrol enemy walking in a random initial direction.
    pub fn spawn_patrol(&mut self, rect: Rect) -> ActorId {
        let direction = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.spawn_patrol_facing(rect, direction)
    }

    /// Patrol enemy with a fixed initial direction. It only ever reacts to
    /// the solid geometry that exists right now.
    pub fn spawn_patrol_facing(&mut self, rect: Rect, direction: f32) -> ActorId {
        let terrain = self
            .actors
            .values()
            .filter(|a| a.in_group(Groups::SOLID))
            .map(Actor::rect)
            .collect();
        let enemy = PatrolEnemy::new(rect, direction, self.config.patrol.speed, terrain);
        let speed = self.config.world.animation_speed;
        self.spawn(
            ActorKind::PatrolEnemy,
            "tooth",
            Groups::DAMAGE | Groups::PATROL,
            ZLayer::Main,
            speed,
            Body::Patrol(enemy),
        )
    }

    pub fn spawn_shooter(&mut self, rect: Rect, reverse: bool) -> ActorId {
        let shooter = Shooter::new(rect, reverse, &self.config.shooter);
        let speed = self.config.world.animation_speed;
        self.spawn(
            ActorKind::Shooter,
            "shell",
            Groups::SOLID,
            ZLayer::Main,
            speed,
            Body::Shooter(shooter),
        )
    }

    pub fn spawn_projectile(&mut self, request: &SpawnRequest) -> ActorId {
        let cfg = &self.config.shooter;
        let projectile = Projectile::new(
            request.origin,
            request.direction,
            cfg.muzzle_offset,
            cfg.projectile_size,
            cfg.projectile_speed,
            cfg.projectile_lifetime_secs,
            self.elapsed,
        );
        let id = self.spawn(
            ActorKind::Projectile,
            PROJECTILE_SPRITE,
            Groups::DAMAGE | Groups::PROJECTILE,
            ZLayer::Main,
            0.0,
            Body::Projectile(projectile),
        );
        tracing::debug!(
            projectile = %id,
            owner = %request.owner,
            owner_kind = ?request.owner_kind,
            "Projectile spawned"
        );
        id
    }

    /// Remove any actor. Nothing keeps references across ticks, so this is
    /// always safe between ticks.
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        self.actors.remove(&id)
    }

    /// Solid and one-way geometry as it stands now, with the step each
    /// moving platform is about to take.
    pub fn collision_index(&self, dt: f32) -> CollisionIndex {
        let mut index = CollisionIndex::new();
        for actor in self.actors.values() {
            let solid = actor.in_group(Groups::SOLID);
            let semi_solid = actor.in_group(Groups::SEMI_SOLID);
            if !solid && !semi_solid {
                continue;
            }
            let mut obstacle = Obstacle::fixed(actor.id, actor.rect(), actor.old_rect());
            if actor.is_moving() {
                obstacle.moving = true;
                obstacle.displacement = actor.displacement(dt);
            }
            if solid {
                index.push_solid(obstacle);
            }
            if semi_solid {
                index.push_semi_solid(obstacle);
            }
        }
        index
    }

    /// Advance every hazard. Returns projectile spawn requests.
    fn update_hazards(&mut self, dt: f32, events: &mut Vec<SimEvent>) -> Vec<SpawnRequest> {
        let now = self.elapsed;
        let target = self.player.hitbox.center();
        let anim_speed = self.config.world.animation_speed;
        let mut requests = Vec::new();
        let mut expired = Vec::new();

        for actor in self.actors.values_mut() {
            match &mut actor.body {
                Body::Patrol(enemy) => {
                    if enemy.update(dt) {
                        tracing::trace!(enemy = %actor.id, "Enemy reversed");
                        events.push(SimEvent::EnemyReversed { id: actor.id });
                    }
                },
                Body::Shooter(shooter) => {
                    shooter.think(target, now, &self.config.shooter);
                    let frames = self
                        .animations
                        .frame_count(&actor.sprite, shooter.state().as_str());
                    if shooter.animate(dt, anim_speed, frames, &self.config.shooter) {
                        tracing::debug!(shooter = %actor.id, "Shooter fired");
                        requests.push(SpawnRequest {
                            origin: shooter.rect.center(),
                            direction: shooter.direction(),
                            owner: actor.id,
                            owner_kind: actor.kind,
                        });
                    }
                },
                Body::Spike(spike) => spike.update(dt),
                Body::Projectile(projectile) => {
                    if projectile.alive() {
                        projectile.update(dt);
                    } else {
                        expired.push(actor.id);
                    }
                },
                Body::Static(_) | Body::Platform(_) => {},
            }
        }

        for id in expired {
            self.actors.remove(&id);
            tracing::debug!(projectile = %id, "Projectile expired");
            events.push(SimEvent::ProjectileRemoved {
                id,
                reason: RemovalReason::Expired,
            });
        }
        requests
    }

    fn update_platforms(&mut self, dt: f32) {
        for actor in self.actors.values_mut() {
            if let Body::Platform(platform) = &mut actor.body
                && platform.update(dt)
            {
                tracing::trace!(platform = %actor.id, "Platform reached endpoint");
            }
            actor.animate(dt);
        }
    }

    /// Advance one tick in a fixed order: clock, old-rect snapshot, timers,
    /// hazards, spawns, player, platforms, interactions.
    pub fn tick(&mut self, dt: f32, intent: &Intent) -> Vec<SimEvent> {
        self.elapsed += f64::from(dt);
        let now = self.elapsed;
        let mut events = Vec::new();

        self.player.begin_tick();
        for actor in self.actors.values_mut() {
            actor.begin_tick();
        }

        self.player.update_timers(now);
        for actor in self.actors.values_mut() {
            actor.update_timers(now);
        }

        let requests = self.update_hazards(dt, &mut events);
        for request in &requests {
            let id = self.spawn_projectile(request);
            events.push(SimEvent::ProjectileSpawned {
                id,
                owner: request.owner,
                origin: request.origin,
                direction: request.direction,
            });
        }

        let index = self.collision_index(dt);
        let ctx = PlayerContext {
            dt,
            now,
            config: &self.config.player,
            index: &index,
            underside_nudge: self.config.world.platform_underside_nudge,
            animation_speed: self.config.world.animation_speed,
            animations: &self.animations,
        };
        self.player.update(intent, &ctx);

        self.update_platforms(dt);

        events.extend(resolver::resolve_interactions(
            &mut self.actors,
            &self.player.hitbox,
        ));
        events
    }

    /// Everything the renderer needs for the current tick.
    pub fn render_frame(&self) -> RenderFrame {
        let player = &self.player;
        let player_frames = self
            .animations
            .frame_count(PLAYER_SPRITE, player.state.as_str());
        let mut items = vec![RenderItem {
            id: PLAYER_ID,
            kind: ActorKind::Player,
            sprite: PLAYER_SPRITE.to_string(),
            rect: player.rect,
            state: player.state.as_str().to_string(),
            frame: visible_frame(player.frame_index, player_frames),
            flip_x: !player.facing_right,
            flip_y: false,
            z: ZLayer::Main,
        }];

        items.extend(self.actors.values().map(|actor| {
            let state = actor.state_name();
            let frames = self.animations.frame_count(&actor.sprite, state);
            let (flip_x, flip_y) = actor.flip();
            RenderItem {
                id: actor.id,
                kind: actor.kind,
                sprite: actor.sprite.clone(),
                rect: actor.rect(),
                state: state.to_string(),
                frame: visible_frame(actor.frame_index(), frames),
                flip_x,
                flip_y,
                z: actor.z,
            }
        }));

        let focus = player.hitbox.center();
        let mut frame = RenderFrame {
            elapsed: self.elapsed,
            focus: (focus.x, focus.y),
            items,
        };
        frame.sort();
        frame
    }
}

impl Simulation for World {
    type Event = SimEvent;

    fn tick(&mut self, dt: f32, intent: &Intent) -> Vec<SimEvent> {
        World::tick(self, dt, intent)
    }

    fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
