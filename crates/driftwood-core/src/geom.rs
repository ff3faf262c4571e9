use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// 2D vector in world pixels. The y axis points down (screen space).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance_to(self, other: Vec2) -> f32 {
        (other - self).length()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Axis-aligned rectangle: top-left corner plus size, y pointing down.
///
/// Edge setters move the whole rectangle (the size never changes), so
/// `set_bottom(v)` places the bottom edge on `v` by shifting `y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size whose top-left corner sits on `pos`.
    pub fn from_top_left(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Rectangle of the given size centered on `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(
            center.x - size.x / 2.0,
            center.y - size.y / 2.0,
            size.x,
            size.y,
        )
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.left(), self.top())
    }

    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.top())
    }

    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.left(), self.bottom())
    }

    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    /// Midpoint of the left edge.
    pub fn mid_left(&self) -> Vec2 {
        Vec2::new(self.left(), self.y + self.h / 2.0)
    }

    /// Midpoint of the top edge.
    pub fn mid_top(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.top())
    }

    /// Midpoint of the bottom edge.
    pub fn mid_bottom(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.bottom())
    }

    pub fn set_mid_left(&mut self, p: Vec2) {
        self.x = p.x;
        self.y = p.y - self.h / 2.0;
    }

    pub fn set_mid_top(&mut self, p: Vec2) {
        self.x = p.x - self.w / 2.0;
        self.y = p.y;
    }

    pub fn set_mid_bottom(&mut self, p: Vec2) {
        self.x = p.x - self.w / 2.0;
        self.y = p.y - self.h;
    }

    /// Grow (positive) or shrink (negative) by the given total amounts,
    /// keeping the center fixed.
    pub fn inflate(&self, dw: f32, dh: f32) -> Rect {
        Rect::from_center(self.center(), Vec2::new(self.w + dw, self.h + dh))
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    pub fn translated(&self, delta: Vec2) -> Rect {
        Rect::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    /// Strict overlap test. Rectangles that only share an edge do not
    /// overlap, and an empty rectangle never overlaps anything.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.w > 0.0
            && self.h > 0.0
            && other.w > 0.0
            && other.h > 0.0
            && self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Whether this rectangle overlaps any of `others`.
    pub fn overlaps_any<'a>(&self, others: impl IntoIterator<Item = &'a Rect>) -> bool {
        others.into_iter().any(|r| self.overlaps(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_setters_keep_size() {
        let mut r = Rect::new(10.0, 20.0, 30.0, 40.0);
        r.set_bottom(100.0);
        assert_eq!(r.bottom(), 100.0);
        assert_eq!(r.top(), 60.0);
        r.set_right(50.0);
        assert_eq!(r.left(), 20.0);
        assert_eq!(r.size(), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(a.overlaps(&Rect::new(9.5, 9.5, 1.0, 1.0)));
    }

    #[test]
    fn empty_rect_never_overlaps() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Rect::new(5.0, 5.0, 0.0, 3.0)));
        assert!(!Rect::new(5.0, 5.0, 3.0, 0.0).overlaps(&a));
    }

    #[test]
    fn inflate_keeps_center() {
        let r = Rect::new(0.0, 0.0, 128.0, 96.0);
        let hitbox = r.inflate(-76.0, -36.0);
        assert_eq!(hitbox.center(), r.center());
        assert_eq!(hitbox.size(), Vec2::new(52.0, 60.0));
    }

    #[test]
    fn mid_anchors() {
        let mut r = Rect::new(0.0, 0.0, 20.0, 10.0);
        r.set_mid_left(Vec2::new(100.0, 50.0));
        assert_eq!(r.top_left(), Vec2::new(100.0, 45.0));
        r.set_mid_top(Vec2::new(100.0, 50.0));
        assert_eq!(r.top_left(), Vec2::new(90.0, 50.0));
        r.set_mid_bottom(Vec2::new(100.0, 50.0));
        assert_eq!(r.mid_bottom(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn distance() {
        assert_eq!(Vec2::new(0.0, 0.0).distance_to(Vec2::new(3.0, 4.0)), 5.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn overlap_is_symmetric(
                ax in -100.0f32..100.0, ay in -100.0f32..100.0,
                aw in 0.0f32..50.0, ah in 0.0f32..50.0,
                bx in -100.0f32..100.0, by in -100.0f32..100.0,
                bw in 0.0f32..50.0, bh in 0.0f32..50.0,
            ) {
                let a = Rect::new(ax, ay, aw, ah);
                let b = Rect::new(bx, by, bw, bh);
                prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
            }

            #[test]
            fn translate_preserves_size(
                x in -500.0f32..500.0, y in -500.0f32..500.0,
                dx in -50.0f32..50.0, dy in -50.0f32..50.0,
            ) {
                let mut r = Rect::new(x, y, 12.0, 34.0);
                r.translate(Vec2::new(dx, dy));
                prop_assert_eq!(r.size(), Vec2::new(12.0, 34.0));
            }
        }
    }
}
