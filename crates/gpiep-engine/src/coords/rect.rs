use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }

    /// Rectangle shrunk by `amount` on every side (never below zero size).
    #[inline]
    pub fn inset(self, amount: f32) -> Rect {
        Rect::new(
            self.origin.x + amount,
            self.origin.y + amount,
            (self.size.x - 2.0 * amount).max(0.0),
            (self.size.y - 2.0 * amount).max(0.0),
        )
    }

    #[inline]
    pub fn translate(self, by: Vec2) -> Rect {
        Rect::from_origin_size(self.origin + by, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    #[test]
    fn contains_interior_point() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn contains_top_left_inclusive() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn contains_bottom_right_exclusive() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn contains_outside() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(-1.0, 5.0)));
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(5.0, -1.0)));
    }

    #[test]
    fn inset_shrinks_each_side() {
        assert_eq!(r(10.0, 10.0, 20.0, 8.0).inset(2.0), r(12.0, 12.0, 16.0, 4.0));
        assert!(r(0.0, 0.0, 2.0, 2.0).inset(5.0).is_empty());
    }

    #[test]
    fn translate_moves_origin_only() {
        let moved = r(1.0, 2.0, 3.0, 4.0).translate(Vec2::new(10.0, -2.0));
        assert_eq!(moved, r(11.0, 0.0, 3.0, 4.0));
    }
}
