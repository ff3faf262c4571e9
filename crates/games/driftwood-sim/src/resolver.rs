use std::collections::BTreeMap;

use driftwood_core::geom::Rect;

use crate::actor::{Actor, ActorId, Groups};
use crate::events::{RemovalReason, SimEvent};

/// End-of-tick interaction pass.
///
/// Projectiles touching solid geometry are removed first. Then every
/// damage actor overlapping the player's hitbox reports a hit; projectiles
/// are consumed by the hit, other hazards stay.
pub fn resolve_interactions(
    actors: &mut BTreeMap<ActorId, Actor>,
    player_hitbox: &Rect,
) -> Vec<SimEvent> {
    let mut events = Vec::new();

    let solids: Vec<Rect> = actors
        .values()
        .filter(|a| a.in_group(Groups::SOLID))
        .map(Actor::rect)
        .collect();
    let spent: Vec<ActorId> = actors
        .values()
        .filter(|a| a.in_group(Groups::PROJECTILE) && a.rect().overlaps_any(&solids))
        .map(|a| a.id)
        .collect();
    for id in spent {
        actors.remove(&id);
        tracing::debug!(projectile = %id, "Projectile hit terrain");
        events.push(SimEvent::ProjectileRemoved {
            id,
            reason: RemovalReason::Terrain,
        });
    }

    let hits: Vec<(ActorId, bool)> = actors
        .values()
        .filter(|a| a.in_group(Groups::DAMAGE) && a.rect().overlaps(player_hitbox))
        .map(|a| (a.id, a.is_projectile()))
        .collect();
    for (id, is_projectile) in hits {
        let Some(kind) = actors.get(&id).map(Actor::kind) else {
            continue;
        };
        tracing::debug!(source = %id, ?kind, "Player hit");
        events.push(SimEvent::PlayerHit { source: id, kind });
        if is_projectile {
            actors.remove(&id);
            events.push(SimEvent::ProjectileRemoved {
                id,
                reason: RemovalReason::HitPlayer,
            });
        }
    }

    events
}
