use serde::{Deserialize, Serialize};

use driftwood_core::geom::Vec2;

use crate::actor::{ActorId, ActorKind};

/// Why a projectile left the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    Expired,
    Terrain,
    HitPlayer,
}

/// Things that happened during a tick, in the order they happened.
///
/// The world applies no damage itself; hosts that track health react to
/// `PlayerHit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    PlayerHit {
        source: ActorId,
        kind: ActorKind,
    },
    ProjectileSpawned {
        id: ActorId,
        owner: ActorId,
        origin: Vec2,
        direction: f32,
    },
    ProjectileRemoved {
        id: ActorId,
        reason: RemovalReason,
    },
    EnemyReversed {
        id: ActorId,
    },
}

/// Request from a hazard to put a new projectile into the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub origin: Vec2,
    pub direction: f32,
    pub owner: ActorId,
    pub owner_kind: ActorKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_tagged() {
        let ev = SimEvent::ProjectileRemoved {
            id: ActorId(9),
            reason: RemovalReason::Terrain,
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "projectile_removed");
        assert_eq!(json["reason"], "terrain");
    }
}
