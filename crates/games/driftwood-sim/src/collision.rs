use driftwood_core::geom::{Rect, Vec2};

use crate::actor::ActorId;

/// A rectangle other actors resolve against, with its pose at the start of
/// the tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub id: ActorId,
    pub rect: Rect,
    pub old_rect: Rect,
    /// Set for moving platforms; riders are carried by `displacement`.
    pub moving: bool,
    /// Step the obstacle will take this tick.
    pub displacement: Vec2,
}

impl Obstacle {
    pub fn fixed(id: ActorId, rect: Rect, old_rect: Rect) -> Self {
        Self {
            id,
            rect,
            old_rect,
            moving: false,
            displacement: Vec2::ZERO,
        }
    }
}

/// Solid and one-way geometry for one tick, rebuilt from live actors.
#[derive(Debug, Clone, Default)]
pub struct CollisionIndex {
    solids: Vec<Obstacle>,
    semi_solids: Vec<Obstacle>,
}

impl CollisionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_solid(&mut self, obstacle: Obstacle) {
        self.solids.push(obstacle);
    }

    pub fn push_semi_solid(&mut self, obstacle: Obstacle) {
        self.semi_solids.push(obstacle);
    }

    pub fn solids(&self) -> &[Obstacle] {
        &self.solids
    }

    pub fn semi_solids(&self) -> &[Obstacle] {
        &self.semi_solids
    }

    pub fn hits_solid(&self, probe: &Rect) -> bool {
        self.solids.iter().any(|o| o.rect.overlaps(probe))
    }

    pub fn hits_semi_solid(&self, probe: &Rect) -> bool {
        self.semi_solids.iter().any(|o| o.rect.overlaps(probe))
    }

    /// First moving obstacle (solid or one-way) under the given floor probe.
    pub fn moving_under(&self, probe: &Rect) -> Option<&Obstacle> {
        self.solids
            .iter()
            .chain(self.semi_solids.iter())
            .find(|o| o.moving && o.rect.overlaps(probe))
    }
}

/// Positions are compared at whole-pixel resolution so that float drift
/// between a rider and its platform never reads as a fresh crossing.
fn px(v: f32) -> f32 {
    v.floor()
}

/// Horizontal pass: snap the hitbox out of any obstacle whose facing edge it
/// crossed this tick.
pub fn resolve_horizontal(hitbox: &mut Rect, old: &Rect, obstacles: &[Obstacle]) {
    for o in obstacles {
        if !o.rect.overlaps(hitbox) {
            continue;
        }
        // Came from the right
        if hitbox.left() <= o.rect.right() && px(old.left()) >= px(o.old_rect.right()) {
            hitbox.set_left(o.rect.right());
        }
        // Came from the left
        if hitbox.right() >= o.rect.left() && px(old.right()) <= px(o.old_rect.left()) {
            hitbox.set_right(o.rect.left());
        }
    }
}

/// Vertical pass against solid geometry. Any overlap stops vertical motion.
/// When the head meets the underside of a moving obstacle the hitbox is
/// pushed a further `underside_nudge` down so it clears the platform lip.
pub fn resolve_vertical(
    hitbox: &mut Rect,
    old: &Rect,
    velocity_y: &mut f32,
    obstacles: &[Obstacle],
    underside_nudge: f32,
) {
    for o in obstacles {
        if !o.rect.overlaps(hitbox) {
            continue;
        }
        // Head bump
        if hitbox.top() <= o.rect.bottom() && px(old.top()) >= px(o.old_rect.bottom()) {
            hitbox.set_top(o.rect.bottom());
            if o.moving {
                hitbox.y += underside_nudge;
            }
        }
        // Landing
        if hitbox.bottom() >= o.rect.top() && px(old.bottom()) <= px(o.old_rect.top()) {
            hitbox.set_bottom(o.rect.top());
        }
        *velocity_y = 0.0;
    }
}

/// One-way pass: only a downward crossing of the top edge is honored.
pub fn resolve_one_way(
    hitbox: &mut Rect,
    old: &Rect,
    velocity_y: &mut f32,
    obstacles: &[Obstacle],
) {
    for o in obstacles {
        if !o.rect.overlaps(hitbox) {
            continue;
        }
        if hitbox.bottom() >= o.rect.top() && px(old.bottom()) <= px(o.old_rect.top()) {
            hitbox.set_bottom(o.rect.top());
            if *velocity_y >= 0.0 {
                *velocity_y = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(x: f32, y: f32, w: f32, h: f32) -> Obstacle {
        let r = Rect::new(x, y, w, h);
        Obstacle::fixed(ActorId(1), r, r)
    }

    #[test]
    fn landing_snaps_to_top_and_stops() {
        let floor = [block(0.0, 100.0, 200.0, 64.0)];
        let old = Rect::new(50.0, 60.0, 20.0, 40.0); // bottom = 100
        let mut hitbox = old.translated(Vec2::new(0.0, 7.5));
        let mut vy = 450.0;
        resolve_vertical(&mut hitbox, &old, &mut vy, &floor, 6.0);
        assert_eq!(hitbox.bottom(), 100.0);
        assert_eq!(vy, 0.0);
    }

    #[test]
    fn head_bump_snaps_to_bottom() {
        let ceiling = [block(0.0, 0.0, 200.0, 50.0)];
        let old = Rect::new(50.0, 50.0, 20.0, 40.0);
        let mut hitbox = old.translated(Vec2::new(0.0, -10.0));
        let mut vy = -600.0;
        resolve_vertical(&mut hitbox, &old, &mut vy, &ceiling, 6.0);
        assert_eq!(hitbox.top(), 50.0);
        assert_eq!(vy, 0.0);
    }

    #[test]
    fn head_bump_under_moving_obstacle_is_nudged() {
        let mut o = block(0.0, 0.0, 200.0, 50.0);
        o.moving = true;
        let old = Rect::new(50.0, 50.0, 20.0, 40.0);
        let mut hitbox = old.translated(Vec2::new(0.0, -10.0));
        let mut vy = -600.0;
        resolve_vertical(&mut hitbox, &old, &mut vy, &[o], 6.0);
        assert_eq!(hitbox.top(), 56.0);
    }

    #[test]
    fn horizontal_snaps_against_wall() {
        let wall = [block(100.0, 0.0, 64.0, 200.0)];
        let old = Rect::new(70.0, 50.0, 30.0, 40.0); // right = 100
        let mut hitbox = old.translated(Vec2::new(3.3, 0.0));
        resolve_horizontal(&mut hitbox, &old, &wall);
        assert_eq!(hitbox.right(), 100.0);

        let old = Rect::new(164.0, 50.0, 30.0, 40.0); // left = 164
        let mut hitbox = old.translated(Vec2::new(-3.3, 0.0));
        resolve_horizontal(&mut hitbox, &old, &wall);
        assert_eq!(hitbox.left(), 164.0);
    }

    #[test]
    fn preexisting_overlap_is_left_alone() {
        let wall = [block(100.0, 0.0, 64.0, 200.0)];
        let old = Rect::new(110.0, 50.0, 30.0, 40.0);
        let mut hitbox = old.translated(Vec2::new(2.0, 0.0));
        resolve_horizontal(&mut hitbox, &old, &wall);
        assert_eq!(hitbox.left(), 112.0);
    }

    #[test]
    fn one_way_ignores_upward_pass() {
        let plat = [block(0.0, 100.0, 200.0, 16.0)];
        let old = Rect::new(50.0, 80.0, 20.0, 40.0); // bottom 120, below top
        let mut hitbox = old.translated(Vec2::new(0.0, -12.0));
        let mut vy = -700.0;
        resolve_one_way(&mut hitbox, &old, &mut vy, &plat);
        assert_eq!(hitbox.bottom(), 108.0);
        assert_eq!(vy, -700.0);
    }

    #[test]
    fn one_way_catches_downward_landing() {
        let plat = [block(0.0, 100.0, 200.0, 16.0)];
        let old = Rect::new(50.0, 58.0, 20.0, 40.0); // bottom 98
        let mut hitbox = old.translated(Vec2::new(0.0, 9.0));
        let mut vy = 500.0;
        resolve_one_way(&mut hitbox, &old, &mut vy, &plat);
        assert_eq!(hitbox.bottom(), 100.0);
        assert_eq!(vy, 0.0);
    }

    #[test]
    fn moving_under_finds_rideable() {
        let mut index = CollisionIndex::new();
        index.push_solid(block(0.0, 100.0, 50.0, 10.0));
        let mut raft = block(60.0, 100.0, 50.0, 10.0);
        raft.id = ActorId(7);
        raft.moving = true;
        raft.displacement = Vec2::new(2.0, 0.0);
        index.push_semi_solid(raft);

        let probe = Rect::new(70.0, 100.0, 20.0, 2.0);
        assert_eq!(index.moving_under(&probe).map(|o| o.id), Some(ActorId(7)));
        let probe = Rect::new(10.0, 100.0, 20.0, 2.0);
        assert!(index.moving_under(&probe).is_none());
        assert!(index.hits_solid(&probe));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn landing_never_ends_inside_floor(
                gap in 0u8..20,
                x in -40.0f32..220.0,
                step in 0.0f32..40.0,
            ) {
                let floor = [block(0.0, 100.0, 200.0, 64.0)];
                let old = Rect::new(x, 60.0 - f32::from(gap), 20.0, 40.0);
                let mut hitbox = old.translated(Vec2::new(0.0, step));
                let mut vy = step * 60.0;
                resolve_vertical(&mut hitbox, &old, &mut vy, &floor, 6.0);
                prop_assert!(!hitbox.overlaps(&floor[0].rect));
            }
        }
    }
}
