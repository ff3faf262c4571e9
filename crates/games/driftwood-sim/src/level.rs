use serde::{Deserialize, Serialize};

use driftwood_core::geom::{Rect, Vec2};
use driftwood_core::layer::ZLayer;
use rand::Rng;

use crate::World;
use crate::actor::{ActorKind, Body, Groups, StaticBody};
use crate::animation::AnimationSet;
use crate::config::SimConfig;
use crate::error::LevelError;
use crate::platform::{MovingPlatform, PathAxis};
use crate::spike::Spike;

/// Terrain tile layers, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileLayer {
    Bg,
    Terrain,
    Fg,
    Platforms,
}

impl TileLayer {
    fn groups(self) -> Groups {
        match self {
            TileLayer::Terrain => Groups::SOLID,
            TileLayer::Platforms => Groups::SEMI_SOLID,
            TileLayer::Bg | TileLayer::Fg => Groups::empty(),
        }
    }

    fn z(self) -> ZLayer {
        match self {
            TileLayer::Bg => ZLayer::BgTiles,
            TileLayer::Fg => ZLayer::Fg,
            TileLayer::Terrain | TileLayer::Platforms => ZLayer::Main,
        }
    }

    fn sprite(self) -> &'static str {
        match self {
            TileLayer::Bg => "bg",
            TileLayer::Terrain => "terrain",
            TileLayer::Fg => "fg",
            TileLayer::Platforms => "platforms",
        }
    }
}

fn one() -> u32 {
    1
}

/// A block of `w` x `h` tiles starting at grid cell (`x`, `y`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileDescriptor {
    pub layer: TileLayer,
    pub x: i32,
    pub y: i32,
    #[serde(default = "one")]
    pub w: u32,
    #[serde(default = "one")]
    pub h: u32,
}

/// A placed object. Sizes default to one tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Floor spikes hanging from the ceiling.
    #[serde(default)]
    pub inverted: bool,
}

/// An object moving along the path box (`x`, `y`, `width`, `height`).
///
/// `spike` orbits the box center; every other name shuttles along the box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingObjectDescriptor {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    #[serde(default)]
    pub flip: bool,
    /// Rideable one-way platform; otherwise a damaging saw.
    #[serde(default)]
    pub platform: bool,
    pub radius: Option<f32>,
    pub start_angle: Option<f32>,
    /// Missing, not past `start_angle`, or a full turn past it means a
    /// full circle.
    pub end_angle: Option<f32>,
    pub body_width: Option<f32>,
    pub body_height: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDescriptor {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Shooters face left when set.
    #[serde(default)]
    pub reverse: bool,
}

/// Authored level data, usually read from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    #[serde(default)]
    pub seed: u64,
    pub tile_size: Option<f32>,
    #[serde(default)]
    pub tiles: Vec<TileDescriptor>,
    #[serde(default)]
    pub objects: Vec<ObjectDescriptor>,
    #[serde(default)]
    pub moving_objects: Vec<MovingObjectDescriptor>,
    #[serde(default)]
    pub enemies: Vec<EnemyDescriptor>,
    /// Frame counts layered over the stock set.
    #[serde(default)]
    pub animations: AnimationSet,
}

fn positive(object: &str, property: &'static str, value: f32) -> Result<(), LevelError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(LevelError::NonPositive {
            object: object.to_string(),
            property,
            value,
        })
    }
}

fn positive_opt(object: &str, property: &'static str, value: Option<f32>) -> Result<(), LevelError> {
    value.map_or(Ok(()), |v| positive(object, property, v))
}

impl LevelDescriptor {
    pub fn from_toml_str(content: &str) -> Result<Self, LevelError> {
        let level: LevelDescriptor = toml::from_str(content)?;
        level.validate()?;
        Ok(level)
    }

    pub fn load(path: &str) -> Result<Self, LevelError> {
        let content = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Check authored properties before anything is built.
    pub fn validate(&self) -> Result<(), LevelError> {
        positive_opt("level", "tile_size", self.tile_size)?;

        let players = self.objects.iter().filter(|o| o.name == "player").count();
        match players {
            0 => return Err(LevelError::MissingPlayer),
            1 => {},
            _ => return Err(LevelError::DuplicatePlayer),
        }

        for obj in &self.objects {
            positive_opt(&obj.name, "width", obj.width)?;
            positive_opt(&obj.name, "height", obj.height)?;
        }

        for obj in &self.moving_objects {
            positive(&obj.name, "speed", obj.speed)?;
            if obj.name == "spike" {
                let radius = obj.radius.ok_or_else(|| LevelError::MissingProperty {
                    object: obj.name.clone(),
                    property: "radius",
                })?;
                if radius < 0.0 || !radius.is_finite() {
                    return Err(LevelError::Negative {
                        object: obj.name.clone(),
                        property: "radius",
                        value: radius,
                    });
                }
                if obj.start_angle.is_none() {
                    return Err(LevelError::MissingProperty {
                        object: obj.name.clone(),
                        property: "start_angle",
                    });
                }
            } else {
                positive(&obj.name, "width", obj.width)?;
                positive(&obj.name, "height", obj.height)?;
                positive_opt(&obj.name, "body_width", obj.body_width)?;
                positive_opt(&obj.name, "body_height", obj.body_height)?;
            }
        }

        for enemy in &self.enemies {
            if enemy.name != "tooth" && enemy.name != "shell" {
                return Err(LevelError::UnknownEnemy(enemy.name.clone()));
            }
            positive_opt(&enemy.name, "width", enemy.width)?;
            positive_opt(&enemy.name, "height", enemy.height)?;
        }
        Ok(())
    }
}

impl World {
    /// Build a world from validated level data.
    ///
    /// Spawn order follows the file: tiles, objects (including the player),
    /// moving objects, enemies. Patrol enemies only see solids spawned
    /// before them.
    pub fn from_level(level: &LevelDescriptor, config: SimConfig) -> Result<World, LevelError> {
        level.validate()?;
        config.validate()?;

        let mut animations = AnimationSet::standard();
        animations.merge(&level.animations);
        let tile = level.tile_size.unwrap_or(config.world.tile_size);
        let mut world = World::new(config, animations, level.seed);

        for block in &level.tiles {
            world.spawn_tile_block(block, tile);
        }
        for obj in &level.objects {
            world.spawn_object(obj, tile);
        }
        for obj in &level.moving_objects {
            world.spawn_moving_object(obj, tile)?;
        }
        for enemy in &level.enemies {
            let size = Vec2::new(enemy.width.unwrap_or(tile), enemy.height.unwrap_or(tile));
            let rect = Rect::from_top_left(Vec2::new(enemy.x, enemy.y), size);
            match enemy.name.as_str() {
                "tooth" => world.spawn_patrol(rect),
                "shell" => world.spawn_shooter(rect, enemy.reverse),
                other => return Err(LevelError::UnknownEnemy(other.to_string())),
            };
        }

        tracing::debug!(
            actors = world.actor_count(),
            seed = level.seed,
            "Level loaded"
        );
        Ok(world)
    }

    fn spawn_tile_block(&mut self, block: &TileDescriptor, tile: f32) {
        for dy in 0..block.h as i32 {
            for dx in 0..block.w as i32 {
                let pos = Vec2::new((block.x + dx) as f32 * tile, (block.y + dy) as f32 * tile);
                self.spawn(
                    ActorKind::Tile,
                    block.layer.sprite(),
                    block.layer.groups(),
                    block.layer.z(),
                    0.0,
                    Body::Static(StaticBody::new(Rect::from_top_left(pos, Vec2::new(tile, tile)))),
                );
            }
        }
    }

    fn spawn_object(&mut self, obj: &ObjectDescriptor, tile: f32) {
        let pos = Vec2::new(obj.x, obj.y);
        if obj.name == "player" {
            self.place_player(pos);
            return;
        }

        let size = Vec2::new(obj.width.unwrap_or(tile), obj.height.unwrap_or(tile));
        let rect = Rect::from_top_left(pos, size);
        let base_speed = self.config().world.animation_speed;
        let (kind, groups, animation_speed) = match obj.name.as_str() {
            "crate" | "barrel" => (ActorKind::Prop, Groups::SOLID, 0.0),
            "palm_small" | "palm_large" => {
                let jitter: f32 = self.rng.random_range(-1.0..1.0);
                (ActorKind::Prop, Groups::SEMI_SOLID, base_speed + jitter)
            },
            "saw" => (ActorKind::Saw, Groups::DAMAGE, base_speed),
            "floor_spike" => (ActorKind::Spike, Groups::DAMAGE, base_speed),
            _ => (ActorKind::Decoration, Groups::empty(), base_speed),
        };
        let z = if obj.name.contains("bg") {
            ZLayer::BgDetails
        } else {
            ZLayer::Main
        };

        let mut body = StaticBody::new(rect);
        body.flip_y = obj.name == "floor_spike" && obj.inverted;
        self.spawn(kind, &obj.name, groups, z, animation_speed, Body::Static(body));

        if obj.name == "candle" {
            let glow = rect.translated(Vec2::new(-20.0, 20.0));
            self.spawn(
                ActorKind::Decoration,
                "candle_light",
                Groups::empty(),
                z,
                base_speed,
                Body::Static(StaticBody::new(glow)),
            );
        }
    }

    fn spawn_moving_object(
        &mut self,
        obj: &MovingObjectDescriptor,
        tile: f32,
    ) -> Result<(), LevelError> {
        let path = Rect::new(obj.x, obj.y, obj.width, obj.height);
        if obj.name == "spike" {
            self.spawn_orbiting_spike(obj, path.center());
            return Ok(());
        }

        let default_size = if obj.platform {
            Vec2::new(tile * 2.0, tile / 2.0)
        } else {
            Vec2::new(tile, tile)
        };
        let size = Vec2::new(
            obj.body_width.unwrap_or(default_size.x),
            obj.body_height.unwrap_or(default_size.y),
        );
        let (path_len, body_len) = if path.w > path.h {
            (path.w, size.x)
        } else {
            (path.h, size.y)
        };
        if path_len < body_len {
            return Err(LevelError::PathShorterThanBody {
                object: obj.name.clone(),
                path: path_len,
                body: body_len,
            });
        }

        let platform = MovingPlatform::from_path_box(path, size, obj.speed, obj.flip);
        let axis = platform.axis();
        let (start, end) = (platform.start(), platform.end());
        self.spawn_platform(&obj.name, platform, obj.platform);

        if obj.name == "saw" {
            self.spawn_chain(start, end, axis);
        }
        Ok(())
    }

    fn spawn_orbiting_spike(&mut self, obj: &MovingObjectDescriptor, center: Vec2) {
        let world = &self.config().world;
        let (spike_size, link_size, spacing) =
            (world.spike_size, world.chain_link_size, world.chain_spacing);
        let radius = obj.radius.unwrap_or(0.0);
        let start = obj.start_angle.unwrap_or(0.0);
        let end = obj.end_angle.filter(|&end| end > start && end - start < 360.0);

        self.spawn_spike(Spike::new(
            center,
            Vec2::new(spike_size, spike_size),
            radius,
            obj.speed,
            start,
            end,
        ));

        if spacing <= 0.0 || spacing.is_nan() {
            return;
        }
        let mut r = 0.0;
        while r < radius {
            let link = Spike::new(center, Vec2::new(link_size, link_size), r, obj.speed, start, end);
            self.spawn(
                ActorKind::Decoration,
                "spike_chain",
                Groups::empty(),
                ZLayer::BgDetails,
                0.0,
                Body::Spike(link),
            );
            r += spacing;
        }
    }

    /// Chain links drawn along a saw's path.
    fn spawn_chain(&mut self, start: Vec2, end: Vec2, axis: PathAxis) {
        let world = &self.config().world;
        let (link, spacing) = (world.chain_link_size, world.chain_spacing);
        let size = Vec2::new(link, link);
        let (from, to) = match axis {
            PathAxis::X => (start.x, end.x),
            PathAxis::Y => (start.y, end.y),
        };

        if spacing <= 0.0 || spacing.is_nan() {
            return;
        }
        let mut along = from;
        while along < to {
            let pos = match axis {
                PathAxis::X => Vec2::new(along, start.y - link / 2.0),
                PathAxis::Y => Vec2::new(start.x - link / 2.0, along),
            };
            self.spawn(
                ActorKind::Decoration,
                "saw_chain",
                Groups::empty(),
                ZLayer::BgDetails,
                0.0,
                Body::Static(StaticBody::new(Rect::from_top_left(pos, size))),
            );
            along += spacing;
        }
    }
}
