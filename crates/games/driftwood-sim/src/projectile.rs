use driftwood_core::geom::{Rect, Vec2};
use driftwood_core::timer::Timer;

/// A shot travelling in a straight horizontal line until it hits something
/// or its lifetime runs out.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub rect: Rect,
    pub old_rect: Rect,
    direction: f32,
    speed: f32,
    lifetime: Timer,
}

impl Projectile {
    /// Spawn centered `muzzle_offset` ahead of `origin` along `direction`.
    /// The lifetime window opens at `now`.
    pub fn new(
        origin: Vec2,
        direction: f32,
        muzzle_offset: f32,
        size: f32,
        speed: f32,
        lifetime_secs: f32,
        now: f64,
    ) -> Self {
        let center = origin + Vec2::new(muzzle_offset * direction, 0.0);
        let rect = Rect::from_center(center, Vec2::new(size, size));
        let mut lifetime = Timer::new(lifetime_secs);
        lifetime.start(now);
        Self {
            rect,
            old_rect: rect,
            direction,
            speed,
            lifetime,
        }
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn update_timers(&mut self, now: f64) {
        self.lifetime.update(now);
    }

    /// Whether the lifetime window is still open. Once closed the
    /// projectile must be removed.
    pub fn alive(&self) -> bool {
        self.lifetime.is_active()
    }

    pub fn update(&mut self, dt: f32) {
        self.rect.x += self.direction * self.speed * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pearl(now: f64) -> Projectile {
        Projectile::new(Vec2::new(100.0, 50.0), -1.0, 50.0, 24.0, 150.0, 5.0, now)
    }

    #[test]
    fn spawns_ahead_of_origin() {
        let p = pearl(0.0);
        assert_eq!(p.rect.center(), Vec2::new(50.0, 50.0));
        assert_eq!(p.rect.size(), Vec2::new(24.0, 24.0));
    }

    #[test]
    fn travels_in_a_straight_line() {
        let mut p = pearl(0.0);
        p.update(0.5);
        assert_eq!(p.rect.center(), Vec2::new(-25.0, 50.0));
    }

    #[test]
    fn lifetime_closes_after_duration() {
        let mut p = pearl(1.0);
        p.update_timers(5.9);
        assert!(p.alive());
        p.update_timers(6.0);
        assert!(!p.alive());
    }
}
