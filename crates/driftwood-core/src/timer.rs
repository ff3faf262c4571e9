use serde::{Deserialize, Serialize};

/// Countdown window measured on the simulation clock (seconds).
///
/// `start(now)` opens the window until `now + duration`; `update(now)`
/// closes it once the clock reaches the expiry instant. A repeating timer
/// reopens itself from the expiry instant instead of closing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    duration: f64,
    repeat: bool,
    started_at: f64,
    active: bool,
}

impl Timer {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: f64::from(duration),
            repeat: false,
            started_at: 0.0,
            active: false,
        }
    }

    pub fn repeating(duration: f32) -> Self {
        Self {
            repeat: true,
            ..Self::new(duration)
        }
    }

    /// Open (or reopen) the window at `now`.
    pub fn start(&mut self, now: f64) {
        self.started_at = now;
        self.active = true;
    }

    /// Advance to `now`. Returns `true` on the call that observes expiry.
    pub fn update(&mut self, now: f64) -> bool {
        if !self.active || now - self.started_at < self.duration {
            return false;
        }
        if self.repeat && self.duration > 0.0 {
            while now - self.started_at >= self.duration {
                self.started_at += self.duration;
            }
        } else if self.repeat {
            self.started_at = now;
        } else {
            self.active = false;
        }
        true
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn duration(&self) -> f32 {
        self.duration as f32
    }

    /// Seconds left before expiry, zero when inactive.
    pub fn remaining(&self, now: f64) -> f32 {
        if self.active {
            (self.started_at + self.duration - now).max(0.0) as f32
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_until_started() {
        let mut t = Timer::new(0.5);
        assert!(!t.is_active());
        assert!(!t.update(10.0));
        assert!(!t.is_active());
    }

    #[test]
    fn expires_at_duration() {
        let mut t = Timer::new(5.0);
        t.start(0.0);
        assert!(!t.update(4.99));
        assert!(t.is_active());
        assert!(t.update(5.01));
        assert!(!t.is_active());
    }

    #[test]
    fn expiry_is_reported_once() {
        let mut t = Timer::new(1.0);
        t.start(2.0);
        assert!(t.update(3.0));
        assert!(!t.update(3.5));
    }

    #[test]
    fn restart_extends_window() {
        let mut t = Timer::new(0.4);
        t.start(0.0);
        t.update(0.3);
        t.start(0.3);
        t.update(0.5);
        assert!(t.is_active(), "restart at 0.3 should keep it open until 0.7");
        t.update(0.71);
        assert!(!t.is_active());
    }

    #[test]
    fn cancel_closes_window() {
        let mut t = Timer::new(1.0);
        t.start(0.0);
        t.cancel();
        assert!(!t.is_active());
        assert_eq!(t.remaining(0.5), 0.0);
    }

    #[test]
    fn repeating_timer_stays_active() {
        let mut t = Timer::repeating(1.0);
        t.start(0.0);
        assert!(t.update(1.0));
        assert!(t.is_active());
        assert!((t.remaining(1.25) - 0.75).abs() < 1e-6);
        assert!(t.update(3.5));
        assert!((t.remaining(3.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn keeps_tick_resolution_after_days_of_uptime() {
        let dt = f64::from(1.0f32 / 60.0);
        let mut now = 3.0 * 24.0 * 3600.0;
        let mut t = Timer::new(0.5);
        t.start(now);
        for _ in 0..29 {
            now += dt;
            t.update(now);
        }
        assert!(t.is_active());
        for _ in 0..2 {
            now += dt;
            t.update(now);
        }
        assert!(!t.is_active());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn never_active_past_duration(
                start in 0.0f64..100.0,
                duration in 0.01f32..10.0,
                offset in 0.0f64..20.0,
            ) {
                let mut t = Timer::new(duration);
                t.start(start);
                let now = start + offset;
                t.update(now);
                if now - start >= f64::from(duration) {
                    prop_assert!(!t.is_active());
                } else {
                    prop_assert!(t.is_active());
                }
            }
        }
    }
}
