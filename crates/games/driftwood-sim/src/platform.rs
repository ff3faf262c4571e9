use serde::{Deserialize, Serialize};

use driftwood_core::geom::{Rect, Vec2};

/// Distance under which a platform counts as having reached an endpoint.
const ARRIVAL_EPSILON: f32 = 1e-3;

/// Axis a moving platform travels along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathAxis {
    X,
    Y,
}

/// An actor shuttling back and forth between two endpoints at constant
/// speed. Used for rideable platforms and for moving saws.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingPlatform {
    pub rect: Rect,
    pub old_rect: Rect,
    start: Vec2,
    end: Vec2,
    axis: PathAxis,
    speed: f32,
    direction: Vec2,
    flip: bool,
    pub frame_index: f32,
}

impl MovingPlatform {
    /// Place a platform of `size` on the start point. X paths anchor the
    /// left edge midpoint, Y paths the top edge midpoint.
    ///
    /// A path shorter than the body is stretched to fit it, leaving a
    /// platform that never moves.
    pub fn new(size: Vec2, start: Vec2, end: Vec2, axis: PathAxis, speed: f32, flip: bool) -> Self {
        let mut rect = Rect::from_top_left(Vec2::ZERO, size);
        let (direction, end) = match axis {
            PathAxis::X => {
                rect.set_mid_left(start);
                (Vec2::new(1.0, 0.0), Vec2::new(end.x.max(start.x + size.x), end.y))
            },
            PathAxis::Y => {
                rect.set_mid_top(start);
                (Vec2::new(0.0, 1.0), Vec2::new(end.x, end.y.max(start.y + size.y)))
            },
        };
        Self {
            rect,
            old_rect: rect,
            start,
            end,
            axis,
            speed,
            direction,
            flip,
            frame_index: 0.0,
        }
    }

    /// Derive the path from an authored box: wider than tall runs along x
    /// through the vertical middle, otherwise along y through the
    /// horizontal middle.
    pub fn from_path_box(path: Rect, size: Vec2, speed: f32, flip: bool) -> Self {
        if path.w > path.h {
            let start = path.mid_left();
            let end = start + Vec2::new(path.w, 0.0);
            Self::new(size, start, end, PathAxis::X, speed, flip)
        } else {
            let start = path.mid_top();
            let end = start + Vec2::new(0.0, path.h);
            Self::new(size, start, end, PathAxis::Y, speed, flip)
        }
    }

    pub fn axis(&self) -> PathAxis {
        self.axis
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn end(&self) -> Vec2 {
        self.end
    }

    /// Room left for travel once the body is on the path.
    pub fn slack(&self) -> f32 {
        match self.axis {
            PathAxis::X => self.end.x - self.start.x - self.rect.w,
            PathAxis::Y => self.end.y - self.start.y - self.rect.h,
        }
    }

    /// Step this platform takes over `dt`, clamped so it never runs past
    /// the endpoint it is heading for. Riders add exactly this.
    pub fn displacement(&self, dt: f32) -> Vec2 {
        let step = self.speed * dt;
        match self.axis {
            PathAxis::X if self.direction.x > 0.0 => {
                Vec2::new(step.min(self.end.x - self.rect.right()).max(0.0), 0.0)
            },
            PathAxis::X => Vec2::new(-step.min(self.rect.left() - self.start.x).max(0.0), 0.0),
            PathAxis::Y if self.direction.y > 0.0 => {
                Vec2::new(0.0, step.min(self.end.y - self.rect.bottom()).max(0.0))
            },
            PathAxis::Y => Vec2::new(0.0, -step.min(self.rect.top() - self.start.y).max(0.0)),
        }
    }

    /// Move one step. Returns `true` when the platform turned around.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.slack() <= ARRIVAL_EPSILON {
            return false;
        }
        let step = self.displacement(dt);
        self.rect.translate(step);
        self.check_border()
    }

    fn check_border(&mut self) -> bool {
        match self.axis {
            PathAxis::X => {
                if self.direction.x > 0.0 && self.rect.right() >= self.end.x - ARRIVAL_EPSILON {
                    self.direction.x = -1.0;
                    self.rect.set_right(self.end.x);
                    return true;
                }
                if self.direction.x < 0.0 && self.rect.left() <= self.start.x + ARRIVAL_EPSILON {
                    self.direction.x = 1.0;
                    self.rect.set_left(self.start.x);
                    return true;
                }
            },
            PathAxis::Y => {
                if self.direction.y > 0.0 && self.rect.bottom() >= self.end.y - ARRIVAL_EPSILON {
                    self.direction.y = -1.0;
                    self.rect.set_bottom(self.end.y);
                    return true;
                }
                if self.direction.y < 0.0 && self.rect.top() <= self.start.y + ARRIVAL_EPSILON {
                    self.direction.y = 1.0;
                    self.rect.set_top(self.start.y);
                    return true;
                }
            },
        }
        false
    }

    /// Horizontal and vertical mirroring for the renderer. Only platforms
    /// authored with `flip` mirror while travelling backwards.
    pub fn flip_flags(&self) -> (bool, bool) {
        if self.flip {
            (self.direction.x < 0.0, self.direction.y < 0.0)
        } else {
            (false, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raft() -> MovingPlatform {
        MovingPlatform::from_path_box(
            Rect::new(100.0, 200.0, 300.0, 40.0),
            Vec2::new(100.0, 20.0),
            100.0,
            true,
        )
    }

    #[test]
    fn wide_box_runs_horizontally() {
        let p = raft();
        assert_eq!(p.axis(), PathAxis::X);
        assert_eq!(p.rect.left(), 100.0);
        assert_eq!(p.rect.center().y, 220.0);
        assert_eq!(p.end(), Vec2::new(400.0, 220.0));
    }

    #[test]
    fn tall_box_runs_vertically() {
        let p = MovingPlatform::from_path_box(
            Rect::new(0.0, 0.0, 40.0, 300.0),
            Vec2::new(64.0, 16.0),
            50.0,
            false,
        );
        assert_eq!(p.axis(), PathAxis::Y);
        assert_eq!(p.rect.top(), 0.0);
        assert_eq!(p.rect.center().x, 20.0);
        assert_eq!(p.direction(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn displacement_matches_update() {
        let mut p = raft();
        let before = p.rect;
        let d = p.displacement(0.1);
        p.update(0.1);
        assert_eq!(p.rect.top_left(), before.top_left() + d);
    }

    #[test]
    fn clamps_and_reverses_at_end() {
        let mut p = raft();
        // 200 px of travel available at 100 px/s
        for _ in 0..19 {
            assert!(!p.update(0.1));
        }
        let d = p.displacement(0.5);
        assert!((d.x - 10.0).abs() < 1e-3, "clamped to remaining distance, got {d:?}");
        assert!(p.update(0.5));
        assert_eq!(p.rect.right(), 400.0);
        assert_eq!(p.direction().x, -1.0);
        assert!(p.displacement(0.1).x < 0.0);
    }

    #[test]
    fn path_shorter_than_body_stands_still() {
        let mut p = MovingPlatform::from_path_box(
            Rect::new(0.0, 0.0, 100.0, 20.0),
            Vec2::new(128.0, 16.0),
            100.0,
            true,
        );
        assert_eq!(p.slack(), 0.0);
        let home = p.rect;
        for _ in 0..10 {
            assert_eq!(p.displacement(1.0 / 60.0), Vec2::ZERO);
            assert!(!p.update(1.0 / 60.0));
            assert_eq!(p.rect, home);
        }
        assert_eq!(p.flip_flags(), (false, false));
    }

    #[test]
    fn flip_only_when_authored() {
        let mut p = raft();
        p.direction = Vec2::new(-1.0, 0.0);
        assert_eq!(p.flip_flags(), (true, false));
        p.flip = false;
        assert_eq!(p.flip_flags(), (false, false));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn never_leaves_path(
                speed in 10.0f32..400.0,
                steps in proptest::collection::vec(0.001f32..0.1, 1..300),
            ) {
                let mut p = MovingPlatform::from_path_box(
                    Rect::new(0.0, 0.0, 500.0, 10.0),
                    Vec2::new(80.0, 16.0),
                    speed,
                    false,
                );
                for dt in steps {
                    p.update(dt);
                    prop_assert!(p.rect.left() >= -1e-3);
                    prop_assert!(p.rect.right() <= 500.0 + 1e-3);
                }
            }
        }
    }
}
