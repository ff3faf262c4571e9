use driftwood_core::geom::{Rect, Vec2};
use driftwood_core::test_helpers::flat_floor;
use driftwood_sim::World;
use driftwood_sim::actor::ActorKind;
use driftwood_sim::animation::AnimationSet;
use driftwood_sim::config::SimConfig;
use driftwood_sim::events::SimEvent;

/// Top edge of the floor every scenario stands on.
pub const FLOOR_Y: f32 = 640.0;
pub const TILE: f32 = 64.0;

/// 40 tiles of flat floor with the player standing at `player_x`.
pub fn floor_world(player_x: f32) -> World {
    let mut world = World::new(SimConfig::default(), AnimationSet::standard(), 42);
    for tile in flat_floor(0.0, FLOOR_Y, 40, TILE) {
        world.spawn_tile(tile);
    }
    world.player_mut().place_feet(Vec2::new(player_x, FLOOR_Y));
    world
}

/// Shooter sitting on the floor with its left edge at `x`.
pub fn shooter_rect(x: f32) -> Rect {
    Rect::new(x, FLOOR_Y - TILE, TILE, TILE)
}

pub fn count_kind(world: &World, kind: ActorKind) -> usize {
    world.actors_of_kind(kind).count()
}

pub fn spawned(events: &[SimEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, SimEvent::ProjectileSpawned { .. }))
        .count()
}
