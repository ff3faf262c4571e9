use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Player horizontal speed (px/s).
pub const PLAYER_SPEED: f32 = 200.0;
/// Gravity acceleration (px/s^2, downward).
pub const GRAVITY: f32 = 1300.0;
/// Initial upward speed of a jump (px/s).
pub const JUMP_HEIGHT: f32 = 900.0;
/// Patrol enemy walking speed (px/s).
pub const PATROL_SPEED: f32 = 200.0;
/// Projectile travel speed (px/s).
pub const PROJECTILE_SPEED: f32 = 150.0;
/// Frames advanced per second by every animation.
pub const ANIMATION_SPEED: f32 = 6.0;
/// Side length of one terrain tile (px).
pub const TILE_SIZE: f32 = 64.0;

/// Player movement and ability tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f32,
    pub gravity: f32,
    pub jump_height: f32,
    /// Visible sprite size; the hitbox is this shrunk by the inset.
    pub sprite_width: f32,
    pub sprite_height: f32,
    pub hitbox_inset_x: f32,
    pub hitbox_inset_y: f32,
    /// Wall-slide fall speed is `gravity / wall_slide_divisor`.
    pub wall_slide_divisor: f32,
    /// Lift applied to the hitbox bottom on a grounded jump.
    pub jump_nudge: f32,
    /// Depth of the contact probe strips.
    pub probe_depth: f32,
    pub wall_jump_secs: f32,
    pub wall_slide_block_secs: f32,
    pub platform_skip_secs: f32,
    pub attack_block_secs: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            gravity: GRAVITY,
            jump_height: JUMP_HEIGHT,
            sprite_width: 128.0,
            sprite_height: 96.0,
            hitbox_inset_x: 76.0,
            hitbox_inset_y: 36.0,
            wall_slide_divisor: 10.0,
            jump_nudge: 1.0,
            probe_depth: 2.0,
            wall_jump_secs: 0.4,
            wall_slide_block_secs: 0.25,
            platform_skip_secs: 0.1,
            attack_block_secs: 0.5,
        }
    }
}

/// Patrol enemy tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolConfig {
    pub speed: f32,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            speed: PATROL_SPEED,
        }
    }
}

/// Ambush shooter and projectile tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterConfig {
    /// Center-to-center distance under which the target is noticed.
    pub sight_radius: f32,
    /// Maximum vertical center offset for the target to count as level.
    pub vertical_band: f32,
    pub fire_cooldown_secs: f32,
    /// Fire-animation frame on which the projectile leaves.
    pub fire_frame: usize,
    /// Horizontal offset from the shooter center to the projectile center.
    pub muzzle_offset: f32,
    pub projectile_speed: f32,
    pub projectile_lifetime_secs: f32,
    pub projectile_size: f32,
}

impl Default for ShooterConfig {
    fn default() -> Self {
        Self {
            sight_radius: 500.0,
            vertical_band: 30.0,
            fire_cooldown_secs: 3.0,
            fire_frame: 3,
            muzzle_offset: 50.0,
            projectile_speed: PROJECTILE_SPEED,
            projectile_lifetime_secs: 5.0,
            projectile_size: 24.0,
        }
    }
}

/// World-wide tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub tile_size: f32,
    pub animation_speed: f32,
    /// Extra push applied when the player's head meets the underside of a
    /// moving obstacle.
    pub platform_underside_nudge: f32,
    pub spike_size: f32,
    pub chain_link_size: f32,
    /// Spacing between chain links drawn along saw paths and spike arms.
    pub chain_spacing: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            animation_speed: ANIMATION_SPEED,
            platform_underside_nudge: 6.0,
            spike_size: 48.0,
            chain_link_size: 16.0,
            chain_spacing: 20.0,
        }
    }
}

/// Top-level simulation configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub player: PlayerConfig,
    pub patrol: PatrolConfig,
    pub shooter: ShooterConfig,
    pub world: WorldConfig,
}

impl SimConfig {
    /// Load config from the file named by `DRIFTWOOD_SIM_CONFIG` (default
    /// `config/sim.toml`). Falls back to defaults if the file is missing,
    /// unparseable or out of range.
    pub fn load() -> Self {
        let path = std::env::var("DRIFTWOOD_SIM_CONFIG")
            .unwrap_or_else(|_| "config/sim.toml".to_string());
        match Self::from_path(&path) {
            Ok(cfg) => cfg,
            Err(ConfigError::Io { .. }) => SimConfig::default(),
            Err(e) => {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                SimConfig::default()
            },
        }
    }

    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: SimConfig = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would stall or degenerate the simulation: sizes,
    /// rates and spacings must be positive, and the hitbox must keep some
    /// area after the inset.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.player;
        let w = &self.world;
        let checks = [
            ("world.tile_size", w.tile_size),
            ("world.animation_speed", w.animation_speed),
            ("world.chain_spacing", w.chain_spacing),
            ("world.chain_link_size", w.chain_link_size),
            ("world.spike_size", w.spike_size),
            ("player.hitbox_width", p.sprite_width - p.hitbox_inset_x),
            ("player.hitbox_height", p.sprite_height - p.hitbox_inset_y),
            ("player.wall_slide_divisor", p.wall_slide_divisor),
            ("shooter.projectile_size", self.shooter.projectile_size),
        ];
        for (field, value) in checks {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }
}
